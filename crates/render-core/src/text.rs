//! Measured text.
//!
//! Text reaches the emitter already broken into paragraphs and lines, with
//! each line's width, height and ascent computed by a [`TextMeasurer`].

use crate::error::RenderError;
use folio_style::TextAlign;

#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub text: String,
    pub width: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub spans: Vec<Span>,
    pub width: f32,
    pub height: f32,
    pub ascent: f32,
}

impl Line {
    pub fn text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Paragraph {
    pub lines: Vec<Line>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextBlock {
    pub paragraphs: Vec<Paragraph>,
    pub align: TextAlign,
    /// Horizontal offset of the first line of each paragraph.
    pub first_line_inset: f32,
}

impl TextBlock {
    pub fn lines(&self) -> impl Iterator<Item = &Line> {
        self.paragraphs.iter().flat_map(|p| p.lines.iter())
    }

    pub fn is_empty(&self) -> bool {
        self.lines().next().is_none()
    }

    pub fn width(&self) -> f32 {
        self.lines().map(|l| l.width).fold(0.0, f32::max)
    }

    pub fn height(&self) -> f32 {
        self.lines().map(|l| l.height).sum()
    }
}

/// Inputs to measurement, resolved from a component's style and font.
#[derive(Debug, Clone, PartialEq)]
pub struct TextOptions {
    pub font_size: f32,
    pub line_height: f32,
    /// Baseline offset from the top of a line.
    pub ascent: f32,
    pub max_width: Option<f32>,
    pub align: TextAlign,
    pub first_line_inset: f32,
}

impl Default for TextOptions {
    fn default() -> Self {
        Self {
            font_size: 12.0,
            line_height: 14.4,
            ascent: 9.6,
            max_width: None,
            align: TextAlign::Left,
            first_line_inset: 0.0,
        }
    }
}

/// Breaks raw text into measured lines.
pub trait TextMeasurer {
    fn measure(&self, text: &str, options: &TextOptions) -> Result<TextBlock, RenderError>;
}
