//! Defines primitives for size and position values.
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub enum Dimension {
    Pt(f32),
    Percent(f32),
    #[default]
    Auto,
}

impl Dimension {
    /// Resolves against the containing length. `Auto` yields `None`.
    pub fn resolve(&self, container: f32) -> Option<f32> {
        match self {
            Dimension::Pt(v) => Some(*v),
            Dimension::Percent(p) => Some(container * p / 100.0),
            Dimension::Auto => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum PageSize {
    #[default]
    A4,
    Letter,
    Legal,
    Custom { width: f32, height: f32 },
}

impl PageSize {
    pub fn dimensions_pt(&self) -> (f32, f32) {
        match self {
            PageSize::A4 => (595.28, 841.89),
            PageSize::Letter => (612.0, 792.0),
            PageSize::Legal => (612.0, 1008.0),
            PageSize::Custom { width, height } => (*width, *height),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_resolve() {
        assert_eq!(Dimension::Pt(12.0).resolve(100.0), Some(12.0));
        assert_eq!(Dimension::Percent(50.0).resolve(300.0), Some(150.0));
        assert_eq!(Dimension::Auto.resolve(300.0), None);
    }

    #[test]
    fn test_page_size_dimensions() {
        assert_eq!(PageSize::Letter.dimensions_pt(), (612.0, 792.0));
        assert_eq!(
            PageSize::Custom { width: 100.0, height: 200.0 }.dimensions_pt(),
            (100.0, 200.0)
        );
    }
}
