//! Stroke and fill keyword values.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum LineCap {
    #[default]
    Butt,
    Round,
    Square,
}

impl LineCap {
    /// Operand of the `J` operator.
    pub fn operand(self) -> i64 {
        match self {
            LineCap::Butt => 0,
            LineCap::Round => 1,
            LineCap::Square => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum LineJoin {
    #[default]
    Miter,
    Round,
    Bevel,
}

impl LineJoin {
    /// Operand of the `j` operator.
    pub fn operand(self) -> i64 {
        match self {
            LineJoin::Miter => 0,
            LineJoin::Round => 1,
            LineJoin::Bevel => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum FillRule {
    #[default]
    NonZero,
    EvenOdd,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum BorderStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
    None,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum PatternRepeat {
    #[default]
    Repeat,
    RepeatX,
    RepeatY,
    NoRepeat,
}

/// A dash array and its starting phase. An empty array draws a solid line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct DashPattern {
    pub segments: Vec<f32>,
    pub phase: f32,
}

impl DashPattern {
    pub fn new(segments: Vec<f32>, phase: f32) -> Self {
        Self { segments, phase }
    }

    pub fn solid() -> Self {
        Self::default()
    }

    pub fn is_solid(&self) -> bool {
        self.segments.is_empty() || self.segments.iter().all(|s| *s == 0.0)
    }

    /// The dash used for a border style drawn with the given width.
    pub fn for_border(style: BorderStyle, width: f32) -> Option<Self> {
        let w = width.max(0.5);
        match style {
            BorderStyle::Dashed => Some(Self::new(vec![w * 3.0, w * 2.0], 0.0)),
            BorderStyle::Dotted => Some(Self::new(vec![w, w], 0.0)),
            BorderStyle::Solid | BorderStyle::None => None,
        }
    }
}
