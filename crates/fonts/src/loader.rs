//! Turning a font source into a [`FontDefinition`].

use crate::definition::{FontDefinition, FontSource, FontStyle};
use crate::error::FontError;
use std::sync::Arc;

/// Loads the definition for one catalog face. Called at most once per face
/// by the catalog.
pub trait FontLoader: Send + Sync {
    fn load(
        &self,
        family: &str,
        style: FontStyle,
        source: &FontSource,
    ) -> Result<FontDefinition, FontError>;
}

/// Reads the program and its header metrics with `ttf-parser`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TtfFontLoader;

impl FontLoader for TtfFontLoader {
    fn load(
        &self,
        family: &str,
        style: FontStyle,
        source: &FontSource,
    ) -> Result<FontDefinition, FontError> {
        let data = match source {
            FontSource::File(path) => Arc::new(std::fs::read(path).map_err(|e| FontError::Io {
                path: path.clone(),
                message: e.to_string(),
            })?),
            FontSource::Embedded(bytes) => bytes.clone(),
            FontSource::Builtin => {
                let mut builtin = FontDefinition::helvetica();
                builtin.style = style;
                return Ok(builtin);
            }
        };

        let face = ttf_parser::Face::parse(&data, 0).map_err(|e| FontError::Parse {
            family: family.to_string(),
            message: e.to_string(),
        })?;

        // Fall back to the family name when the font has no usable name entry.
        let postscript_name =
            extract_postscript_name(&face).unwrap_or_else(|| family.replace(' ', ""));

        Ok(FontDefinition {
            family: family.to_string(),
            style,
            postscript_name,
            units_per_em: face.units_per_em(),
            ascender: face.ascender(),
            descender: face.descender(),
            program: Some(data.clone()),
        })
    }
}

fn extract_postscript_name(face: &ttf_parser::Face<'_>) -> Option<String> {
    face.names()
        .into_iter()
        .filter(|name| name.name_id == ttf_parser::name_id::POST_SCRIPT_NAME)
        .find_map(|name| name.to_string())
        .filter(|name| !name.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_source_yields_standard_font() {
        let def = TtfFontLoader
            .load("Helvetica", FontStyle::BOLD, &FontSource::Builtin)
            .unwrap();
        assert!(def.is_standard());
        assert_eq!(def.style, FontStyle::BOLD);
    }

    #[test]
    fn garbage_bytes_fail_to_parse() {
        let source = FontSource::Embedded(Arc::new(vec![0u8; 16]));
        let err = TtfFontLoader.load("Junk", FontStyle::REGULAR, &source).unwrap_err();
        assert!(matches!(err, FontError::Parse { .. }));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let source = FontSource::File("/nonexistent/folio/font.ttf".into());
        let err = TtfFontLoader.load("Missing", FontStyle::REGULAR, &source).unwrap_err();
        assert!(matches!(err, FontError::Io { .. }));
    }
}
