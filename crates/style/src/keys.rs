//! Typed style keys.
//!
//! A `StyleKey<T>` binds a kind, an attribute name and the parser used to
//! read it, so `Style::get(&keys::FILL_COLOR)` yields a typed value.

use crate::dimension::{Dimension, PageSize};
use crate::font::{FontStyle, FontWeight};
use crate::item::StyleKind;
use crate::paint::{BorderStyle, DashPattern, FillRule, LineCap, LineJoin, PatternRepeat};
use crate::parsers::*;
use crate::text::TextAlign;
use folio_types::{ColorValue, Point, Size, Thickness};
use std::fmt;

pub type ParseFn<T> = fn(&str) -> Result<T, StyleParseError>;

pub struct StyleKey<T> {
    pub kind: StyleKind,
    pub name: &'static str,
    pub parse: ParseFn<T>,
}

impl<T> StyleKey<T> {
    pub const fn new(kind: StyleKind, name: &'static str, parse: ParseFn<T>) -> Self {
        Self { kind, name, parse }
    }
}

impl<T> Clone for StyleKey<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for StyleKey<T> {}

impl<T> fmt::Debug for StyleKey<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.kind.prefix(), self.name)
    }
}

/// Colors read as `Option` because `inherit`, `none` and `transparent` unset them.
pub type ColorKey = StyleKey<Option<ColorValue>>;

// Fill
pub const FILL_COLOR: ColorKey = StyleKey::new(StyleKind::Fill, "color", parse_color_value);
pub const FILL_OPACITY: StyleKey<f32> =
    StyleKey::new(StyleKind::Fill, "opacity", parse_unit_interval);
pub const FILL_RULE: StyleKey<FillRule> = StyleKey::new(StyleKind::Fill, "rule", parse_fill_rule);
pub const FILL_IMAGE: StyleKey<String> = StyleKey::new(StyleKind::Fill, "image", parse_text);
pub const FILL_REPEAT: StyleKey<PatternRepeat> =
    StyleKey::new(StyleKind::Fill, "repeat", parse_pattern_repeat);
pub const FILL_PATTERN_SIZE: StyleKey<Size> =
    StyleKey::new(StyleKind::Fill, "size", parse_size_value);
pub const FILL_PATTERN_STEP: StyleKey<Size> =
    StyleKey::new(StyleKind::Fill, "step", parse_size_value);
pub const FILL_PATTERN_POSITION: StyleKey<Point> =
    StyleKey::new(StyleKind::Fill, "position", parse_point_value);

// Stroke
pub const STROKE_COLOR: ColorKey = StyleKey::new(StyleKind::Stroke, "color", parse_color_value);
pub const STROKE_WIDTH: StyleKey<f32> =
    StyleKey::new(StyleKind::Stroke, "width", parse_length_value);
pub const STROKE_DASH: StyleKey<DashPattern> =
    StyleKey::new(StyleKind::Stroke, "dash", parse_dash_value);
pub const STROKE_CAP: StyleKey<LineCap> = StyleKey::new(StyleKind::Stroke, "cap", parse_line_cap);
pub const STROKE_JOIN: StyleKey<LineJoin> =
    StyleKey::new(StyleKind::Stroke, "join", parse_line_join);
pub const STROKE_MITER: StyleKey<f32> = StyleKey::new(StyleKind::Stroke, "miter", parse_number);
pub const STROKE_OPACITY: StyleKey<f32> =
    StyleKey::new(StyleKind::Stroke, "opacity", parse_unit_interval);

// Background
pub const BACKGROUND_COLOR: ColorKey =
    StyleKey::new(StyleKind::Background, "color", parse_color_value);
pub const BACKGROUND_OPACITY: StyleKey<f32> =
    StyleKey::new(StyleKind::Background, "opacity", parse_unit_interval);
pub const BACKGROUND_IMAGE: StyleKey<String> =
    StyleKey::new(StyleKind::Background, "image", parse_text);
pub const BACKGROUND_REPEAT: StyleKey<PatternRepeat> =
    StyleKey::new(StyleKind::Background, "repeat", parse_pattern_repeat);

// Border
pub const BORDER_COLOR: ColorKey = StyleKey::new(StyleKind::Border, "color", parse_color_value);
pub const BORDER_WIDTH: StyleKey<f32> =
    StyleKey::new(StyleKind::Border, "width", parse_length_value);
pub const BORDER_STYLE: StyleKey<BorderStyle> =
    StyleKey::new(StyleKind::Border, "style", parse_border_style);
pub const BORDER_DASH: StyleKey<DashPattern> =
    StyleKey::new(StyleKind::Border, "dash", parse_dash_value);
pub const BORDER_RADIUS: StyleKey<f32> =
    StyleKey::new(StyleKind::Border, "radius", parse_length_value);

// Font
pub const FONT_FAMILY: StyleKey<String> =
    StyleKey::new(StyleKind::Font, "family", parse_font_family);
pub const FONT_SIZE: StyleKey<f32> = StyleKey::new(StyleKind::Font, "size", parse_length_value);
pub const FONT_WEIGHT: StyleKey<FontWeight> =
    StyleKey::new(StyleKind::Font, "weight", parse_font_weight);
pub const FONT_STYLE: StyleKey<FontStyle> =
    StyleKey::new(StyleKind::Font, "style", parse_font_style);
pub const FONT_BOLD: StyleKey<bool> = StyleKey::new(StyleKind::Font, "bold", parse_bool);
pub const FONT_ITALIC: StyleKey<bool> = StyleKey::new(StyleKind::Font, "italic", parse_bool);
pub const FONT_UNDERLINE: StyleKey<bool> = StyleKey::new(StyleKind::Font, "underline", parse_bool);
pub const FONT_STRIKEOUT: StyleKey<bool> = StyleKey::new(StyleKind::Font, "strikeout", parse_bool);
pub const FONT_LINE_HEIGHT: StyleKey<f32> =
    StyleKey::new(StyleKind::Font, "line-height", parse_length_value);

// Text
pub const TEXT_ALIGN: StyleKey<TextAlign> =
    StyleKey::new(StyleKind::Text, "align", parse_text_align);
pub const TEXT_INDENT: StyleKey<f32> = StyleKey::new(StyleKind::Text, "indent", parse_length_value);

// Position
pub const POSITION_X: StyleKey<f32> = StyleKey::new(StyleKind::Position, "x", parse_length_value);
pub const POSITION_Y: StyleKey<f32> = StyleKey::new(StyleKind::Position, "y", parse_length_value);
pub const POSITION_WIDTH: StyleKey<Dimension> =
    StyleKey::new(StyleKind::Position, "width", parse_dimension_value);
pub const POSITION_HEIGHT: StyleKey<Dimension> =
    StyleKey::new(StyleKind::Position, "height", parse_dimension_value);

// Margins and padding
pub const MARGIN_ALL: StyleKey<Thickness> =
    StyleKey::new(StyleKind::Margins, "all", parse_thickness_value);
pub const MARGIN_TOP: StyleKey<f32> = StyleKey::new(StyleKind::Margins, "top", parse_length_value);
pub const MARGIN_RIGHT: StyleKey<f32> =
    StyleKey::new(StyleKind::Margins, "right", parse_length_value);
pub const MARGIN_BOTTOM: StyleKey<f32> =
    StyleKey::new(StyleKind::Margins, "bottom", parse_length_value);
pub const MARGIN_LEFT: StyleKey<f32> =
    StyleKey::new(StyleKind::Margins, "left", parse_length_value);
pub const PADDING_ALL: StyleKey<Thickness> =
    StyleKey::new(StyleKind::Padding, "all", parse_thickness_value);
pub const PADDING_TOP: StyleKey<f32> = StyleKey::new(StyleKind::Padding, "top", parse_length_value);
pub const PADDING_RIGHT: StyleKey<f32> =
    StyleKey::new(StyleKind::Padding, "right", parse_length_value);
pub const PADDING_BOTTOM: StyleKey<f32> =
    StyleKey::new(StyleKind::Padding, "bottom", parse_length_value);
pub const PADDING_LEFT: StyleKey<f32> =
    StyleKey::new(StyleKind::Padding, "left", parse_length_value);

// Misc
pub const CLIP_ENABLED: StyleKey<bool> = StyleKey::new(StyleKind::Clip, "enabled", parse_bool);
pub const OVERFLOW_HIDDEN: StyleKey<bool> =
    StyleKey::new(StyleKind::Overflow, "hidden", parse_bool);
pub const TRANSFORM_OFFSET: StyleKey<Point> =
    StyleKey::new(StyleKind::Transform, "offset", parse_point_value);
pub const PAGE_SIZE: StyleKey<PageSize> = StyleKey::new(StyleKind::Page, "size", parse_page_size);
