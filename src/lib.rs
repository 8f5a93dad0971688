//! folio renders trees of styled components into content-stream operators.
//!
//! The pieces live in workspace crates and are re-exported here:
//! - [`style`]: attributes, rules, selector matching and the cascade
//! - [`fonts`]: the process-wide font catalog
//! - [`emitter`]: the content-stream emitter, brushes and pens
//! - [`resource`]: the document resource registry
//!
//! This crate adds the component model and [`DocumentRenderer`], which walks
//! a tree, resolves each component's style and paints it.

pub mod component;
pub mod config;
pub mod error;
pub mod measure;
pub mod renderer;

pub use component::{ComponentContent, ComponentNode, Document, RuleSpec};
pub use config::{FolioConfig, RenderOptions};
pub use error::FolioError;
pub use measure::FixedAdvanceMeasurer;
pub use renderer::DocumentRenderer;

pub use folio_fonts as fonts;
pub use folio_render_core as render;
pub use folio_render_lopdf as emitter;
pub use folio_resource as resource;
pub use folio_style as style;
pub use folio_traits as traits;
pub use folio_types as types;
