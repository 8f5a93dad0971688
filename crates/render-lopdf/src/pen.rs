//! Stroke paints.

use crate::emitter::ContentEmitter;
use folio_render_core::{OperatorSink, RenderError};
use folio_style::{DashPattern, LineCap, LineJoin};
use folio_types::{ColorValue, Rect};

/// Line settings shared by every visible pen.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    pub color: ColorValue,
    pub width: f32,
    pub cap: LineCap,
    pub join: LineJoin,
    pub miter_limit: f32,
    pub opacity: Option<f32>,
}

impl Stroke {
    pub fn new(color: ColorValue, width: f32) -> Self {
        Self {
            color,
            width,
            cap: LineCap::Butt,
            join: LineJoin::Miter,
            miter_limit: 10.0,
            opacity: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Pen {
    None,
    Solid(Stroke),
    Dash(Stroke, DashPattern),
}

impl Pen {
    pub fn is_none(&self) -> bool {
        matches!(self, Pen::None)
    }

    pub fn stroke(&self) -> Option<&Stroke> {
        match self {
            Pen::None => None,
            Pen::Solid(stroke) | Pen::Dash(stroke, _) => Some(stroke),
        }
    }

    pub fn set_up<S: OperatorSink>(
        &self,
        emitter: &mut ContentEmitter<'_, S>,
        _bounds: Rect,
    ) -> Result<(), RenderError> {
        let Some(stroke) = self.stroke() else {
            return Ok(());
        };
        emitter.save_state()?;
        emitter.set_stroke_color(&stroke.color)?;
        emitter.set_line_width(stroke.width)?;
        emitter.set_line_cap(stroke.cap)?;
        emitter.set_line_join(stroke.join)?;
        if stroke.join == LineJoin::Miter {
            emitter.set_miter_limit(stroke.miter_limit)?;
        }
        if let Pen::Dash(_, dash) = self {
            emitter.set_dash(dash)?;
        }
        if let Some(opacity) = stroke.opacity {
            emitter.set_stroke_opacity(opacity)?;
        }
        Ok(())
    }

    pub fn release<S: OperatorSink>(
        &self,
        emitter: &mut ContentEmitter<'_, S>,
        _bounds: Rect,
    ) -> Result<(), RenderError> {
        match self {
            Pen::None => Ok(()),
            Pen::Solid(_) | Pen::Dash(..) => emitter.restore_state(),
        }
    }
}
