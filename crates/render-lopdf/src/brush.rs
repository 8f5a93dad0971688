//! Fill paints.

use crate::emitter::ContentEmitter;
use folio_render_core::{OperatorSink, RenderError};
use folio_style::PatternRepeat;
use folio_traits::{Resource, ResourcePayload, TilingPattern};
use folio_types::{ColorValue, Point, Rect, ResourceKey, Size};

/// An image tiled across the filled area.
#[derive(Debug, Clone, PartialEq)]
pub struct PatternFill {
    pub image: ResourceKey,
    /// Tile size; the filled bounds when unset.
    pub size: Option<Size>,
    /// Offset of the first tile from the top-left of the bounds.
    pub position: Point,
    /// Distance between tiles; the tile size when unset.
    pub step: Option<Size>,
    pub repeat: PatternRepeat,
    pub opacity: Option<f32>,
}

/// How an area is filled. `set_up` prepares the emitter before the path is
/// painted; `release` undoes it.
#[derive(Debug, Clone, PartialEq)]
pub enum Brush {
    None,
    Solid { color: ColorValue, opacity: Option<f32> },
    Pattern(PatternFill),
}

impl Brush {
    pub fn solid(color: ColorValue) -> Self {
        Brush::Solid {
            color,
            opacity: None,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Brush::None)
    }

    pub fn set_up<S: OperatorSink>(
        &self,
        emitter: &mut ContentEmitter<'_, S>,
        bounds: Rect,
    ) -> Result<(), RenderError> {
        match self {
            Brush::None => Ok(()),
            Brush::Solid { color, opacity } => {
                emitter.save_state()?;
                emitter.set_fill_color(color)?;
                if let Some(opacity) = opacity {
                    emitter.set_fill_opacity(*opacity)?;
                }
                Ok(())
            }
            Brush::Pattern(fill) => {
                emitter.save_state()?;
                let bounds = if bounds.width > 0.0 && bounds.height > 0.0 {
                    bounds
                } else {
                    let extent = emitter.path_extent();
                    Rect::new(0.0, 0.0, extent.max_x, extent.max_y)
                };
                let pattern = fill.tiling(emitter, bounds)?;
                let key = ResourceKey::from(format!(
                    "{}@{},{}:{}x{}/{}x{}",
                    fill.image,
                    pattern.matrix[4],
                    pattern.matrix[5],
                    pattern.tile.width,
                    pattern.tile.height,
                    pattern.step.width,
                    pattern.step.height
                ));
                let name = emitter
                    .registry()
                    .register(Resource::new(key, ResourcePayload::Pattern(pattern)))?;
                emitter.set_fill_pattern(&name)?;
                if let Some(opacity) = fill.opacity {
                    emitter.set_fill_opacity(opacity)?;
                }
                Ok(())
            }
        }
    }

    pub fn release<S: OperatorSink>(
        &self,
        emitter: &mut ContentEmitter<'_, S>,
        _bounds: Rect,
    ) -> Result<(), RenderError> {
        match self {
            Brush::None => Ok(()),
            Brush::Solid { .. } => emitter.restore_state(),
            Brush::Pattern(_) => {
                emitter.clear_fill_pattern();
                emitter.restore_state()
            }
        }
    }
}

impl PatternFill {
    pub fn new(image: impl Into<ResourceKey>) -> Self {
        Self {
            image: image.into(),
            size: None,
            position: Point::default(),
            step: None,
            repeat: PatternRepeat::Repeat,
            opacity: None,
        }
    }

    /// Builds the tiling pattern for `bounds`. Pattern space is anchored at the
    /// device-space bottom-left of the first tile, including any `cm`
    /// translation in effect.
    fn tiling<S: OperatorSink>(
        &self,
        emitter: &mut ContentEmitter<'_, S>,
        bounds: Rect,
    ) -> Result<TilingPattern, RenderError> {
        let tile = self.size.unwrap_or(bounds.size());
        if tile.width <= 0.0 || tile.height <= 0.0 {
            return Err(RenderError::Argument(format!(
                "pattern tile {}x{} is empty",
                tile.width, tile.height
            )));
        }
        let mut step = self.step.unwrap_or(tile);
        // A single tile along an axis: step past the filled area.
        let past_x = bounds.width + tile.width;
        let past_y = bounds.height + tile.height;
        match self.repeat {
            PatternRepeat::Repeat => {}
            PatternRepeat::RepeatX => step.height = past_y,
            PatternRepeat::RepeatY => step.width = past_x,
            PatternRepeat::NoRepeat => step = Size::new(past_x, past_y),
        }

        let image = emitter.image_name(&self.image)?;
        let (origin_x, origin_y) = emitter.pattern_origin(
            bounds.x + self.position.x,
            bounds.y + self.position.y,
            tile.height,
        );
        Ok(TilingPattern {
            image,
            tile,
            step,
            matrix: [1.0, 0.0, 0.0, 1.0, origin_x, origin_y],
        })
    }
}
