pub mod attribute;
pub mod cascade;
pub mod dimension;
pub mod error;
pub mod font;
pub mod item;
pub mod keys;
pub mod paint;
pub mod parsers;
pub mod selector;
pub mod style;
pub mod text;

pub use attribute::StyleAttribute;
pub use cascade::StyleCascade;
pub use dimension::{Dimension, PageSize};
pub use error::StyleError;
pub use font::{FontStyle, FontWeight};
pub use item::{StyleItem, StyleKind};
pub use keys::StyleKey;
pub use paint::{BorderStyle, DashPattern, FillRule, LineCap, LineJoin, PatternRepeat};
pub use parsers::StyleParseError;
pub use selector::{ComponentState, RuleSet, StyleSelector, Styled};
pub use style::Style;
pub use text::TextAlign;
