//! The font catalog: partitioned family maps, one-time initialization and
//! per-face lazy loading.

use crate::config::FontConfig;
use crate::definition::{FontDefinition, FontSource, FontStyle};
use crate::error::FontError;
use crate::loader::{FontLoader, TtfFontLoader};
use crate::scan::{self, ScannedFace};
use once_cell::sync::OnceCell;
use std::collections::HashMap;
use std::sync::Arc;

/// One face of a family. Its definition is loaded on first use.
struct FaceNode {
    style: FontStyle,
    source: FontSource,
    definition: OnceCell<Arc<FontDefinition>>,
}

/// The faces of one family, in registration order.
struct FamilyFaces {
    name: String,
    faces: Vec<Arc<FaceNode>>,
}

impl FamilyFaces {
    fn exact(&self, style: FontStyle) -> Option<&Arc<FaceNode>> {
        self.faces.iter().find(|f| f.style == style)
    }

    fn first(&self) -> Option<&Arc<FaceNode>> {
        self.faces.first()
    }
}

/// Families keyed by lowercased name.
#[derive(Default)]
struct Partition {
    families: HashMap<String, FamilyFaces>,
}

impl Partition {
    /// Adds a face. A face already present for the same style keeps the
    /// earlier registration.
    fn add(&mut self, family: &str, style: FontStyle, source: FontSource) {
        let entry = self
            .families
            .entry(family.to_lowercase())
            .or_insert_with(|| FamilyFaces {
                name: family.to_string(),
                faces: Vec::new(),
            });
        if entry.exact(style).is_some() {
            log::debug!("Ignoring duplicate face {} {:?}", family, style);
            return;
        }
        entry.faces.push(Arc::new(FaceNode {
            style,
            source,
            definition: OnceCell::new(),
        }));
    }

    fn extend(&mut self, faces: Vec<ScannedFace>) {
        for face in faces {
            self.add(&face.family, face.style, face.source);
        }
    }

    fn family(&self, family: &str) -> Option<&FamilyFaces> {
        self.families.get(&family.to_lowercase())
    }
}

struct CatalogState {
    system: Partition,
    custom: Partition,
}

/// Resolves `(family, style)` requests to loaded font definitions.
///
/// The catalog is built on first use. A failed build is not retried: the
/// captured cause is returned, wrapped in `FontError::Configuration`, from
/// every later call.
pub struct FontCatalog {
    config: FontConfig,
    loader: Arc<dyn FontLoader>,
    state: OnceCell<Result<CatalogState, Arc<FontError>>>,
    fallback: OnceCell<Arc<FontDefinition>>,
}

static GLOBAL: OnceCell<FontCatalog> = OnceCell::new();

impl FontCatalog {
    pub fn new(config: FontConfig) -> Self {
        Self::with_loader(config, Arc::new(TtfFontLoader))
    }

    pub fn with_loader(config: FontConfig, loader: Arc<dyn FontLoader>) -> Self {
        Self {
            config,
            loader,
            state: OnceCell::new(),
            fallback: OnceCell::new(),
        }
    }

    /// The process-wide catalog. Uses the catalog passed to [`install`] if one
    /// was installed first, otherwise the default configuration.
    ///
    /// [`install`]: FontCatalog::install
    pub fn global() -> &'static FontCatalog {
        GLOBAL.get_or_init(|| FontCatalog::new(FontConfig::default()))
    }

    /// Installs the process-wide catalog. Fails, returning the catalog, when
    /// one is already in place.
    pub fn install(catalog: FontCatalog) -> Result<(), FontCatalog> {
        GLOBAL.set(catalog)
    }

    pub fn config(&self) -> &FontConfig {
        &self.config
    }

    /// Builds the partitions now instead of on the first lookup.
    pub fn initialize(&self) -> Result<(), FontError> {
        self.state().map(|_| ())
    }

    /// All known family names, sorted.
    pub fn families(&self) -> Result<Vec<String>, FontError> {
        let state = self.state()?;
        let mut names: Vec<String> = state
            .custom
            .families
            .values()
            .chain(state.system.families.values())
            .map(|f| f.name.clone())
            .collect();
        names.sort_by_key(|n| n.to_lowercase());
        names.dedup_by(|a, b| a.eq_ignore_ascii_case(b));
        Ok(names)
    }

    /// Resolves a font.
    ///
    /// Lookup order: exact face in the custom partition, exact face in the
    /// system partition, then (with substitution) the first face of the
    /// family in either partition, then the fallback font.
    pub fn resolve(
        &self,
        family: &str,
        style: FontStyle,
    ) -> Result<Arc<FontDefinition>, FontError> {
        let state = self.state()?;
        let face = style.face();
        let use_system = self.config.use_system_fonts;
        let custom = state.custom.family(family);
        let system = state.system.family(family).filter(|_| use_system);

        let exact = custom
            .and_then(|f| f.exact(face).map(|n| (f, n)))
            .or_else(|| system.and_then(|f| f.exact(face).map(|n| (f, n))));
        if let Some((faces, node)) = exact {
            return self.load(faces, node);
        }

        if !self.config.font_substitution {
            return Err(FontError::NotFound {
                family: family.to_string(),
                style,
            });
        }

        let substitute = custom
            .and_then(|f| f.first().map(|n| (f, n)))
            .or_else(|| system.and_then(|f| f.first().map(|n| (f, n))));
        if let Some((faces, node)) = substitute {
            log::warn!(
                "No {:?} face for '{}', substituting {:?}",
                face,
                family,
                node.style
            );
            return self.load(faces, node);
        }

        log::warn!(
            "Font '{}' {:?} not found, using fallback '{}'",
            family,
            face,
            self.config.fallback_family
        );
        self.fallback(state)
    }

    fn state(&self) -> Result<&CatalogState, FontError> {
        self.state
            .get_or_init(|| self.build().map_err(Arc::new))
            .as_ref()
            .map_err(|cause| FontError::Configuration {
                message: format!("font catalog initialization failed: {cause}"),
                source: cause.clone(),
            })
    }

    fn build(&self) -> Result<CatalogState, FontError> {
        let mut system = Partition::default();
        if self.config.use_system_fonts {
            system.extend(scan::system_faces());
        }

        let mut custom = Partition::default();
        for registration in &self.config.fonts {
            if !registration.path.is_file() {
                return Err(FontError::Io {
                    path: registration.path.clone(),
                    message: "font file does not exist".to_string(),
                });
            }
            custom.add(
                &registration.family,
                registration.style(),
                FontSource::File(registration.path.clone()),
            );
        }
        for embedded in &self.config.embedded {
            custom.add(
                &embedded.family,
                embedded.style,
                FontSource::Embedded(embedded.data.clone()),
            );
        }
        if let Some(dir) = &self.config.custom_directory {
            custom.extend(scan::directory_faces(dir)?);
        }

        log::debug!(
            "Font catalog ready: {} system families, {} custom families",
            system.families.len(),
            custom.families.len()
        );
        Ok(CatalogState { system, custom })
    }

    /// Loads a face once; concurrent callers for the same face wait for the
    /// first load and share its result.
    fn load(&self, faces: &FamilyFaces, node: &FaceNode) -> Result<Arc<FontDefinition>, FontError> {
        node.definition
            .get_or_try_init(|| {
                log::debug!(
                    "Loading font '{}' {:?} from {}",
                    faces.name,
                    node.style,
                    node.source.describe()
                );
                self.loader
                    .load(&faces.name, node.style, &node.source)
                    .map(Arc::new)
            })
            .cloned()
    }

    fn fallback(&self, state: &CatalogState) -> Result<Arc<FontDefinition>, FontError> {
        let family = &self.config.fallback_family;
        let configured = state
            .custom
            .family(family)
            .or_else(|| state.system.family(family).filter(|_| self.config.use_system_fonts))
            .and_then(|f| f.exact(FontStyle::REGULAR).or_else(|| f.first()).map(|n| (f, n)));
        if let Some((faces, node)) = configured {
            return self.load(faces, node);
        }
        Ok(self
            .fallback
            .get_or_init(|| Arc::new(FontDefinition::helvetica()))
            .clone())
    }
}
