//! Configuration for the renderer and the command line tool.

use crate::error::FolioError;
use folio_fonts::FontConfig;
use folio_style::PageSize;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Defaults applied when a component's style leaves a value unset.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct RenderOptions {
    /// Container size when the root component declares no `page-size`.
    pub page_size: PageSize,
    pub default_font_size: f32,
    /// Line height as a multiple of the font size.
    pub default_line_height: f32,
    /// Family used when no `font-family` is in effect.
    pub default_font_family: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            page_size: PageSize::A4,
            default_font_size: 12.0,
            default_line_height: 1.2,
            default_font_family: "Helvetica".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FolioConfig {
    pub fonts: FontConfig,
    pub render: RenderOptions,
}

impl FolioConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, FolioError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn from_json(json: &str) -> Result<Self, FolioError> {
        let config: FolioConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), FolioError> {
        if self.render.default_font_size <= 0.0 {
            return Err(FolioError::Config(format!(
                "defaultFontSize must be positive, got {}",
                self.render.default_font_size
            )));
        }
        if self.render.default_line_height <= 0.0 {
            return Err(FolioError::Config(format!(
                "defaultLineHeight must be positive, got {}",
                self.render.default_line_height
            )));
        }
        Ok(())
    }
}
