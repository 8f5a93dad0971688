//! Resource registry for folio content streams.
//!
//! - [`DocumentResources`]: names resources per kind and maps image paths
//!   relative to a base directory

mod document;

pub use document::DocumentResources;
