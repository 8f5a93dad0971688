use crate::definition::FontStyle;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum FontError {
    /// Catalog initialization failed. The cause is kept and reported again on
    /// every later call.
    #[error("Font configuration error: {message}")]
    Configuration {
        message: String,
        source: Arc<FontError>,
    },

    #[error("Font not found: family '{family}' with style {style:?}")]
    NotFound { family: String, style: FontStyle },

    #[error("Failed to read font source '{path}': {message}")]
    Io { path: PathBuf, message: String },

    #[error("Failed to parse font '{family}': {message}")]
    Parse { family: String, message: String },
}
