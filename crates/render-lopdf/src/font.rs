use folio_fonts::{FontDefinition, FontStyle};
use folio_traits::{Resource, ResourcePayload};
use std::sync::Arc;

/// A resolved font at a size, as selected into the emitter.
#[derive(Debug, Clone)]
pub struct Font {
    pub definition: Arc<FontDefinition>,
    pub size: f32,
    /// Requested style, including decoration flags.
    pub style: FontStyle,
}

impl Font {
    pub fn new(definition: Arc<FontDefinition>, size: f32, style: FontStyle) -> Self {
        Self {
            definition,
            size,
            style,
        }
    }

    pub fn underlined(&self) -> bool {
        self.style.contains(FontStyle::UNDERLINE)
    }

    pub fn struck_out(&self) -> bool {
        self.style.contains(FontStyle::STRIKEOUT)
    }

    pub fn ascent(&self) -> f32 {
        self.definition.ascent(self.size)
    }

    pub fn descent(&self) -> f32 {
        self.definition.descent(self.size)
    }

    /// Registry entry for this font; keyed by PostScript name so every size
    /// and decoration of one face shares a resource.
    pub(crate) fn resource(&self) -> Resource {
        Resource::new(
            self.definition.postscript_name.as_str(),
            ResourcePayload::Font {
                base_font: self.definition.postscript_name.clone(),
                program: self.definition.program.clone(),
            },
        )
    }
}
