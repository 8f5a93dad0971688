use crate::definition::FontStyle;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

/// A font file registered explicitly by configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FontRegistration {
    pub family: String,
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub italic: bool,
    pub path: PathBuf,
}

impl FontRegistration {
    pub fn style(&self) -> FontStyle {
        FontStyle::from_parts(self.bold, self.italic)
    }
}

/// A font program supplied as bytes.
#[derive(Debug, Clone)]
pub struct EmbeddedFont {
    pub family: String,
    pub style: FontStyle,
    pub data: Arc<Vec<u8>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FontConfig {
    /// Scan the platform font directories into the system partition.
    pub use_system_fonts: bool,
    /// Substitute another face, then the fallback font, when a request has
    /// no exact match.
    pub font_substitution: bool,
    /// Extra directory scanned into the custom partition.
    pub custom_directory: Option<PathBuf>,
    pub fonts: Vec<FontRegistration>,
    pub fallback_family: String,
    #[serde(skip)]
    pub embedded: Vec<EmbeddedFont>,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            use_system_fonts: true,
            font_substitution: true,
            custom_directory: None,
            fonts: Vec::new(),
            fallback_family: "Helvetica".to_string(),
            embedded: Vec::new(),
        }
    }
}

impl FontConfig {
    /// A configuration with no system scan, for tests and sandboxed use.
    pub fn isolated() -> Self {
        Self {
            use_system_fonts: false,
            ..Self::default()
        }
    }

    pub fn with_font(
        mut self,
        family: impl Into<String>,
        style: FontStyle,
        path: impl Into<PathBuf>,
    ) -> Self {
        self.fonts.push(FontRegistration {
            family: family.into(),
            bold: style.contains(FontStyle::BOLD),
            italic: style.contains(FontStyle::ITALIC),
            path: path.into(),
        });
        self
    }

    pub fn with_embedded(
        mut self,
        family: impl Into<String>,
        style: FontStyle,
        data: Vec<u8>,
    ) -> Self {
        self.embedded.push(EmbeddedFont {
            family: family.into(),
            style: style.face(),
            data: Arc::new(data),
        });
        self
    }

    pub fn with_substitution(mut self, enabled: bool) -> Self {
        self.font_substitution = enabled;
        self
    }

    pub fn with_custom_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.custom_directory = Some(dir.into());
        self
    }
}
