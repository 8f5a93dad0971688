//! Tagged color values.
//!
//! Only the device spaces (`Gray`, `Rgb`) can be written to a content stream.
//! The other spaces are kept so that parsed style values survive a round trip
//! through the style model, but they are rejected by the emitter.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ColorError {
    #[error("Color space {0} cannot be constructed for rendering; use ColorValue::stored")]
    UnsupportedSpace(ColorSpace),

    #[error("Color space {space} expects {expected} component(s), got {actual}")]
    ComponentCount {
        space: ColorSpace,
        expected: usize,
        actual: usize,
    },

    #[error("Color component {0} is outside the range 0..1")]
    OutOfRange(f32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColorSpace {
    Gray,
    Rgb,
    Hsl,
    Lab,
    Custom,
}

impl fmt::Display for ColorSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColorSpace::Gray => "Gray",
            ColorSpace::Rgb => "RGB",
            ColorSpace::Hsl => "HSL",
            ColorSpace::Lab => "LAB",
            ColorSpace::Custom => "Custom",
        };
        f.write_str(name)
    }
}

/// A color in one of the supported spaces. Components are normalized to `0..1`
/// for the device spaces. Alpha is never part of the value; opacity is carried
/// by the brush or pen that uses the color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ColorValue {
    Gray(f32),
    Rgb { r: f32, g: f32, b: f32 },
    Hsl { h: f32, s: f32, l: f32 },
    Lab { l: f32, a: f32, b: f32 },
    Custom { components: Vec<f32> },
}

impl Default for ColorValue {
    fn default() -> Self {
        ColorValue::BLACK
    }
}

impl ColorValue {
    pub const BLACK: ColorValue = ColorValue::Gray(0.0);
    pub const WHITE: ColorValue = ColorValue::Gray(1.0);

    pub fn gray(value: f32) -> Self {
        ColorValue::Gray(value.clamp(0.0, 1.0))
    }

    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        ColorValue::Rgb {
            r: r.clamp(0.0, 1.0),
            g: g.clamp(0.0, 1.0),
            b: b.clamp(0.0, 1.0),
        }
    }

    /// Builds an RGB value from 8-bit channels.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        ColorValue::Rgb {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    /// Constructs a renderable color. Only `Gray` and `Rgb` are accepted here.
    pub fn new(space: ColorSpace, components: &[f32]) -> Result<Self, ColorError> {
        let expected = match space {
            ColorSpace::Gray => 1,
            ColorSpace::Rgb => 3,
            other => return Err(ColorError::UnsupportedSpace(other)),
        };
        if components.len() != expected {
            return Err(ColorError::ComponentCount {
                space,
                expected,
                actual: components.len(),
            });
        }
        if let Some(bad) = components.iter().find(|c| !(0.0..=1.0).contains(*c)) {
            return Err(ColorError::OutOfRange(*bad));
        }
        Ok(match space {
            ColorSpace::Gray => ColorValue::Gray(components[0]),
            _ => ColorValue::Rgb {
                r: components[0],
                g: components[1],
                b: components[2],
            },
        })
    }

    /// Keeps raw components for any space. The result is suitable for storage in
    /// a style, not for direct emission.
    pub fn stored(space: ColorSpace, components: &[f32]) -> Result<Self, ColorError> {
        let need = |n: usize| {
            if components.len() == n {
                Ok(())
            } else {
                Err(ColorError::ComponentCount {
                    space,
                    expected: n,
                    actual: components.len(),
                })
            }
        };
        match space {
            ColorSpace::Gray | ColorSpace::Rgb => Self::new(space, components),
            ColorSpace::Hsl => {
                need(3)?;
                Ok(ColorValue::Hsl {
                    h: components[0],
                    s: components[1],
                    l: components[2],
                })
            }
            ColorSpace::Lab => {
                need(3)?;
                Ok(ColorValue::Lab {
                    l: components[0],
                    a: components[1],
                    b: components[2],
                })
            }
            ColorSpace::Custom => Ok(ColorValue::Custom {
                components: components.to_vec(),
            }),
        }
    }

    pub fn space(&self) -> ColorSpace {
        match self {
            ColorValue::Gray(_) => ColorSpace::Gray,
            ColorValue::Rgb { .. } => ColorSpace::Rgb,
            ColorValue::Hsl { .. } => ColorSpace::Hsl,
            ColorValue::Lab { .. } => ColorSpace::Lab,
            ColorValue::Custom { .. } => ColorSpace::Custom,
        }
    }

    pub fn components(&self) -> Vec<f32> {
        match self {
            ColorValue::Gray(v) => vec![*v],
            ColorValue::Rgb { r, g, b } => vec![*r, *g, *b],
            ColorValue::Hsl { h, s, l } => vec![*h, *s, *l],
            ColorValue::Lab { l, a, b } => vec![*l, *a, *b],
            ColorValue::Custom { components } => components.clone(),
        }
    }

    pub fn is_renderable(&self) -> bool {
        matches!(self.space(), ColorSpace::Gray | ColorSpace::Rgb)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb8_normalizes_channels() {
        assert_eq!(ColorValue::from_rgb8(255, 0, 0), ColorValue::rgb(1.0, 0.0, 0.0));
    }

    #[test]
    fn new_rejects_non_device_spaces() {
        let err = ColorValue::new(ColorSpace::Hsl, &[0.0, 1.0, 0.5]).unwrap_err();
        assert_eq!(err, ColorError::UnsupportedSpace(ColorSpace::Hsl));
        assert!(ColorValue::new(ColorSpace::Lab, &[50.0, 0.0, 0.0]).is_err());
    }

    #[test]
    fn new_checks_component_count_and_range() {
        assert!(matches!(
            ColorValue::new(ColorSpace::Rgb, &[0.1, 0.2]),
            Err(ColorError::ComponentCount { expected: 3, actual: 2, .. })
        ));
        assert_eq!(
            ColorValue::new(ColorSpace::Gray, &[1.5]),
            Err(ColorError::OutOfRange(1.5))
        );
    }

    #[test]
    fn stored_keeps_raw_components() {
        let hsl = ColorValue::stored(ColorSpace::Hsl, &[120.0, 0.5, 0.5]).unwrap();
        assert_eq!(hsl.space(), ColorSpace::Hsl);
        assert_eq!(hsl.components(), vec![120.0, 0.5, 0.5]);
        assert!(!hsl.is_renderable());
    }
}
