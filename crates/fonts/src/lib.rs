//! Font catalog for folio.
//!
//! Resolves a `(family, style)` request to a loaded [`FontDefinition`]. Fonts
//! come from two partitions: a "custom" one built from configuration and a
//! "system" one scanned from the platform font directories. Definitions are
//! loaded lazily, once per face, the first time they are resolved.

pub mod catalog;
pub mod config;
pub mod definition;
pub mod error;
pub mod loader;
pub mod scan;

pub use catalog::FontCatalog;
pub use config::{FontConfig, FontRegistration};
pub use definition::{FontDefinition, FontSource, FontStyle};
pub use error::FontError;
pub use loader::{FontLoader, TtfFontLoader};
