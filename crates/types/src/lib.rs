pub mod color;
pub mod geometry;
pub mod ids;

pub use color::{ColorError, ColorSpace, ColorValue};
pub use geometry::{Point, Rect, Size, Thickness};
pub use ids::{ResourceKey, ResourceName};
