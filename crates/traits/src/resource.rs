//! The resource registry contract.
//!
//! Operators refer to fonts, images, patterns and graphics states by a short
//! symbolic name (`/F1 12 Tf`, `/Img1 Do`). A `ResourceRegistry` hands out
//! those names and remembers what each one stands for, so the document layer
//! can later write the matching resource dictionary.

use folio_types::{ResourceKey, ResourceName, Size};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ResourceError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Path '{0}' escapes the resource base directory")]
    PathTraversal(String),

    #[error("Invalid argument: {0}")]
    Argument(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for ResourceError {
    fn from(err: std::io::Error) -> Self {
        ResourceError::Io(err.to_string())
    }
}

/// Shared resource data type (reference-counted bytes).
pub type SharedResourceData = Arc<Vec<u8>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResourceKind {
    Font,
    Image,
    Pattern,
    ExtGState,
}

impl ResourceKind {
    /// Prefix of generated names (`F1`, `Img1`, `P1`, `GS1`).
    pub fn name_prefix(self) -> &'static str {
        match self {
            ResourceKind::Font => "F",
            ResourceKind::Image => "Img",
            ResourceKind::Pattern => "P",
            ResourceKind::ExtGState => "GS",
        }
    }

    /// The resource dictionary entry holding this kind.
    pub fn dictionary_key(self) -> &'static str {
        match self {
            ResourceKind::Font => "Font",
            ResourceKind::Image => "XObject",
            ResourceKind::Pattern => "Pattern",
            ResourceKind::ExtGState => "ExtGState",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dictionary_key())
    }
}

/// Opacity settings carried by an extended graphics state.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ExtGStateParams {
    pub fill_opacity: Option<f32>,
    pub stroke_opacity: Option<f32>,
}

/// An image tiled across a filled area.
#[derive(Debug, Clone, PartialEq)]
pub struct TilingPattern {
    pub image: ResourceName,
    /// Size the image is drawn at within one tile.
    pub tile: Size,
    /// Distance between tile origins.
    pub step: Size,
    /// Pattern space to page space.
    pub matrix: [f32; 6],
}

#[derive(Debug, Clone, PartialEq)]
pub enum ResourcePayload {
    Font {
        base_font: String,
        program: Option<SharedResourceData>,
    },
    Image {
        path: PathBuf,
    },
    Pattern(TilingPattern),
    ExtGState(ExtGStateParams),
}

impl ResourcePayload {
    pub fn kind(&self) -> ResourceKind {
        match self {
            ResourcePayload::Font { .. } => ResourceKind::Font,
            ResourcePayload::Image { .. } => ResourceKind::Image,
            ResourcePayload::Pattern(_) => ResourceKind::Pattern,
            ResourcePayload::ExtGState(_) => ResourceKind::ExtGState,
        }
    }
}

/// Something the content stream refers to by name.
#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
    pub key: ResourceKey,
    pub payload: ResourcePayload,
}

impl Resource {
    pub fn new(key: impl Into<ResourceKey>, payload: ResourcePayload) -> Self {
        Self {
            key: key.into(),
            payload,
        }
    }

    pub fn kind(&self) -> ResourceKind {
        self.payload.kind()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RegisteredResource {
    pub name: ResourceName,
    pub resource: Resource,
}

/// Assigns symbolic names to resources used by a content stream.
pub trait ResourceRegistry {
    /// Registers `resource` and returns its name. Registering an existing
    /// `(kind, key)` again replaces the payload and keeps the name.
    fn register(&mut self, resource: Resource) -> Result<ResourceName, ResourceError>;

    fn resolve(&self, kind: ResourceKind, key: &ResourceKey) -> Option<&RegisteredResource>;

    /// Maps a document-relative path to an absolute one.
    fn map_path(&self, relative: &str) -> Result<PathBuf, ResourceError>;
}
