// src/error.rs
use folio_fonts::FontError;
use folio_render_core::RenderError;
use folio_style::{StyleError, StyleParseError};
use folio_traits::ResourceError;
use thiserror::Error;

/// A comprehensive error type for rendering a component tree.
#[derive(Error, Debug)]
pub enum FolioError {
    #[error("Style error: {0}")]
    Style(#[from] StyleError),

    #[error("Style value error: {0}")]
    StyleParse(#[from] StyleParseError),

    #[error("Font error: {0}")]
    Font(#[from] FontError),

    #[error("Resource error: {0}")]
    Resource(#[from] ResourceError),

    #[error("Rendering failed: {0}")]
    Render(#[from] RenderError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration is invalid: {0}")]
    Config(String),
}
