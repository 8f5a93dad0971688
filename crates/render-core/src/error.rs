use folio_traits::ResourceError;
use folio_types::ColorSpace;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Color space {0} cannot be rendered directly")]
    UnsupportedColorSpace(ColorSpace),
    #[error("Invalid argument: {0}")]
    Argument(String),
    #[error("Graphics state discipline violated: {0}")]
    StateDiscipline(String),
    #[error("Resource error: {0}")]
    Resource(#[from] ResourceError),
}
