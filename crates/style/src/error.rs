use crate::item::StyleKind;
use thiserror::Error;

/// Errors raised while reading or combining style data.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StyleError {
    #[error("Required style attribute '{key}' is not set")]
    MissingAttribute { key: String },

    #[error("Style attribute '{key}' could not be converted to {target}: {message}")]
    TypeConversion {
        key: String,
        target: &'static str,
        message: String,
    },

    #[error("Cannot merge a {source_kind:?} item into a {target_kind:?} item")]
    KindMismatch {
        source_kind: StyleKind,
        target_kind: StyleKind,
    },

    #[error("Invalid argument: {0}")]
    Argument(String),

    #[error("Unknown style property '{0}'")]
    UnknownProperty(String),
}
