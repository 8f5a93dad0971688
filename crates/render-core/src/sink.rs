use crate::error::RenderError;
use lopdf::content::{Content, Operation};

/// Append-only destination for content-stream operators.
pub trait OperatorSink {
    fn push(&mut self, operation: Operation) -> Result<(), RenderError>;

    /// Number of operators written so far.
    fn operation_count(&self) -> usize;
}

/// Buffers operators in memory; `Content::encode` produces the stream bytes.
impl OperatorSink for Content {
    fn push(&mut self, operation: Operation) -> Result<(), RenderError> {
        self.operations.push(operation);
        Ok(())
    }

    fn operation_count(&self) -> usize {
        self.operations.len()
    }
}

impl<S: OperatorSink + ?Sized> OperatorSink for &mut S {
    fn push(&mut self, operation: Operation) -> Result<(), RenderError> {
        (**self).push(operation)
    }

    fn operation_count(&self) -> usize {
        (**self).operation_count()
    }
}
