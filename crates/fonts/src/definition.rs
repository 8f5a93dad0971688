use bitflags::bitflags;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

bitflags! {
    /// Requested font style. Only `BOLD` and `ITALIC` select a face; the
    /// decoration flags are drawn by the renderer.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct FontStyle: u8 {
        const BOLD = 0b0001;
        const ITALIC = 0b0010;
        const UNDERLINE = 0b0100;
        const STRIKEOUT = 0b1000;
    }
}

impl FontStyle {
    pub const REGULAR: FontStyle = FontStyle::empty();

    /// The flags that pick a face within a family.
    pub fn face(self) -> FontStyle {
        self & (FontStyle::BOLD | FontStyle::ITALIC)
    }

    pub fn from_parts(bold: bool, italic: bool) -> FontStyle {
        let mut style = FontStyle::empty();
        style.set(FontStyle::BOLD, bold);
        style.set(FontStyle::ITALIC, italic);
        style
    }
}

/// Where a font program comes from.
#[derive(Clone)]
pub enum FontSource {
    File(PathBuf),
    Embedded(Arc<Vec<u8>>),
    /// A standard PDF font that needs no program.
    Builtin,
}

impl fmt::Debug for FontSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FontSource::File(path) => f.debug_tuple("File").field(path).finish(),
            FontSource::Embedded(bytes) => write!(f, "Embedded({} bytes)", bytes.len()),
            FontSource::Builtin => f.write_str("Builtin"),
        }
    }
}

impl FontSource {
    pub fn describe(&self) -> String {
        match self {
            FontSource::File(path) => path.display().to_string(),
            FontSource::Embedded(bytes) => format!("<{} embedded bytes>", bytes.len()),
            FontSource::Builtin => "<builtin>".to_string(),
        }
    }
}

/// A loaded font: naming, vertical metrics and, unless it is a standard
/// font, the program bytes.
#[derive(Debug, Clone)]
pub struct FontDefinition {
    pub family: String,
    pub style: FontStyle,
    pub postscript_name: String,
    pub units_per_em: u16,
    pub ascender: i16,
    pub descender: i16,
    pub program: Option<Arc<Vec<u8>>>,
}

impl FontDefinition {
    /// The standard-14 Helvetica used when nothing else matches.
    pub fn helvetica() -> Self {
        Self {
            family: "Helvetica".to_string(),
            style: FontStyle::REGULAR,
            postscript_name: "Helvetica".to_string(),
            units_per_em: 1000,
            ascender: 718,
            descender: -207,
            program: None,
        }
    }

    pub fn is_standard(&self) -> bool {
        self.program.is_none()
    }

    /// Distance from baseline to the top of the tallest glyph at `size`.
    pub fn ascent(&self, size: f32) -> f32 {
        self.scale(self.ascender, size)
    }

    /// Distance below the baseline at `size`, as a positive number.
    pub fn descent(&self, size: f32) -> f32 {
        -self.scale(self.descender, size)
    }

    fn scale(&self, units: i16, size: f32) -> f32 {
        if self.units_per_em == 0 {
            return 0.0;
        }
        units as f32 * size / self.units_per_em as f32
    }
}
