//! Discovery of font faces on disk.

use crate::definition::{FontSource, FontStyle};
use crate::error::FontError;
use std::path::Path;

/// A face found by a scan, not yet loaded.
#[derive(Debug, Clone)]
pub struct ScannedFace {
    pub family: String,
    pub style: FontStyle,
    pub source: FontSource,
}

/// Faces in the platform font directories.
#[cfg(feature = "system-fonts")]
pub fn system_faces() -> Vec<ScannedFace> {
    let mut db = fontdb::Database::new();
    db.load_system_fonts();
    faces_from_db(&db)
}

#[cfg(not(feature = "system-fonts"))]
pub fn system_faces() -> Vec<ScannedFace> {
    log::debug!("System font scanning is disabled in this build");
    Vec::new()
}

/// Faces in `dir`. An unreadable directory is an error rather than an empty
/// result.
pub fn directory_faces(dir: &Path) -> Result<Vec<ScannedFace>, FontError> {
    std::fs::read_dir(dir).map_err(|e| FontError::Io {
        path: dir.to_path_buf(),
        message: e.to_string(),
    })?;
    Ok(scan_directory(dir))
}

#[cfg(feature = "system-fonts")]
fn scan_directory(dir: &Path) -> Vec<ScannedFace> {
    let mut db = fontdb::Database::new();
    db.load_fonts_dir(dir);
    faces_from_db(&db)
}

#[cfg(not(feature = "system-fonts"))]
fn scan_directory(dir: &Path) -> Vec<ScannedFace> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };
    entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| matches!(ext.to_ascii_lowercase().as_str(), "ttf" | "otf"))
        })
        .filter_map(|path| {
            let data = std::fs::read(&path).ok()?;
            let face = ttf_parser::Face::parse(&data, 0).ok()?;
            let family = face
                .names()
                .into_iter()
                .filter(|n| n.name_id == ttf_parser::name_id::FAMILY)
                .find_map(|n| n.to_string())?;
            Some(ScannedFace {
                family,
                style: FontStyle::from_parts(face.is_bold(), face.is_italic()),
                source: FontSource::File(path),
            })
        })
        .collect()
}

#[cfg(feature = "system-fonts")]
fn faces_from_db(db: &fontdb::Database) -> Vec<ScannedFace> {
    db.faces()
        .filter_map(|info| {
            let (family, _) = info.families.first()?;
            let path = match &info.source {
                fontdb::Source::File(path) => path.clone(),
                fontdb::Source::SharedFile(path, _) => path.clone(),
                fontdb::Source::Binary(_) => {
                    log::debug!("Skipping in-memory face '{}'", info.post_script_name);
                    return None;
                }
            };
            let bold = info.weight.0 >= fontdb::Weight::SEMIBOLD.0;
            let italic = !matches!(info.style, fontdb::Style::Normal);
            Some(ScannedFace {
                family: family.clone(),
                style: FontStyle::from_parts(bold, italic),
                source: FontSource::File(path),
            })
        })
        .collect()
}
