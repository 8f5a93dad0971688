//! Content-stream emitter built on lopdf operators.
//!
//! [`ContentEmitter`] converts content-space drawing, text and image calls into
//! device-space operators, registering fonts, images, patterns and graphics
//! states with a [`ResourceRegistry`](folio_traits::ResourceRegistry) as it goes.
//! Operators land in any [`OperatorSink`](folio_render_core::OperatorSink):
//! a buffered `lopdf::content::Content` or a [`StreamSink`] over a writer.

mod brush;
mod emitter;
mod font;
mod pen;
mod sink;
mod state;
mod text;

pub use brush::{Brush, PatternFill};
pub use emitter::{ContentEmitter, PathExtent};
pub use font::Font;
pub use pen::{Pen, Stroke};
pub use sink::{StreamSink, escape_literal};
pub use state::{ExtGStateHandle, GraphicsState, SelectedFont};
pub use text::to_win_ansi;

#[cfg(test)]
mod emitter_test;
