//! Core rendering abstractions for folio.
//!
//! This crate provides the pieces shared by content-stream backends:
//! - `OperatorSink`, the append-only destination for operators
//! - the measured-text model consumed by text emission
//! - error types for rendering operations
//! - coordinate conversion helpers

mod error;
mod sink;
pub mod text;
pub mod utils;

pub use error::RenderError;
pub use sink::OperatorSink;
pub use text::{Line, Paragraph, Span, TextBlock, TextMeasurer, TextOptions};
