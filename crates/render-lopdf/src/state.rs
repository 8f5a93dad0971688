//! Graphics state tracked alongside the operator stream.
//!
//! The stream itself keeps the real state stack (`q`/`Q`). This mirror holds
//! what the emitter needs to decide which operators to write: the active
//! extended graphics state, the pattern flag, the translations and the
//! selected font.

use crate::font::Font;
use folio_render_core::RenderError;
use folio_traits::ExtGStateParams;
use folio_types::{Point, ResourceKey, ResourceName};

/// The extended graphics state last applied with `gs`. Handles are keyed by
/// their parameters and never change once emitted.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtGStateHandle {
    pub key: ResourceKey,
    pub name: ResourceName,
    pub params: ExtGStateParams,
}

/// The font selected with `Tf`.
#[derive(Debug, Clone)]
pub struct SelectedFont {
    pub name: ResourceName,
    pub font: Font,
}

#[derive(Debug, Clone, Default)]
pub struct GraphicsState {
    pub ext_gstate: Option<ExtGStateHandle>,
    /// Set while a pattern fill is selected. Translations are then folded into
    /// coordinates instead of written as `cm`, so pattern space (which is
    /// fixed to the page) stays aligned with the element.
    pub pattern_active: bool,
    pub offset: Point,
    /// Cumulative device-space translation written with `cm`.
    pub ctm_translation: Point,
    pub font: Option<SelectedFont>,
}

#[derive(Debug, Default)]
pub struct GraphicsStateStack {
    current: GraphicsState,
    saved: Vec<GraphicsState>,
}

impl GraphicsStateStack {
    pub fn current(&self) -> &GraphicsState {
        &self.current
    }

    pub fn current_mut(&mut self) -> &mut GraphicsState {
        &mut self.current
    }

    pub fn depth(&self) -> usize {
        self.saved.len()
    }

    pub fn save(&mut self) {
        self.saved.push(self.current.clone());
    }

    /// Returns to the last saved state. The extended-state handle is dropped
    /// either way; the next opacity change creates a fresh one.
    pub fn restore(&mut self) -> Result<(), RenderError> {
        let previous = self.saved.pop().ok_or_else(|| {
            RenderError::StateDiscipline("restore without a matching save".to_string())
        })?;
        self.current = previous;
        self.current.ext_gstate = None;
        Ok(())
    }
}
