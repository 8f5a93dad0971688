//! The registry backing one document.
//!
//! Relative paths are mapped against a base directory. Mapped paths must stay
//! inside it, so a document cannot reference `../../../etc/passwd`.

use folio_traits::{RegisteredResource, Resource, ResourceError, ResourceKind, ResourceRegistry};
use folio_types::{ResourceKey, ResourceName};
use indexmap::IndexMap;
use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};

#[derive(Debug)]
pub struct DocumentResources {
    base_path: PathBuf,
    /// Canonicalized base path for the containment check
    canonical_base: Option<PathBuf>,
    entries: IndexMap<(ResourceKind, ResourceKey), RegisteredResource>,
    counters: HashMap<ResourceKind, usize>,
}

impl DocumentResources {
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        let base = base_path.as_ref().to_path_buf();
        // May fail if the directory does not exist yet
        let canonical = base.canonicalize().ok();
        Self {
            base_path: base,
            canonical_base: canonical,
            entries: IndexMap::new(),
            counters: HashMap::new(),
        }
    }

    /// A registry rooted at the current directory.
    pub fn in_current_dir() -> Self {
        Self::new(".")
    }

    pub fn base(&self) -> &Path {
        &self.base_path
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered resources in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &RegisteredResource> {
        self.entries.values()
    }

    pub fn of_kind(&self, kind: ResourceKind) -> impl Iterator<Item = &RegisteredResource> {
        self.entries
            .iter()
            .filter(move |((k, _), _)| *k == kind)
            .map(|(_, entry)| entry)
    }

    fn next_name(&mut self, kind: ResourceKind) -> ResourceName {
        let counter = self.counters.entry(kind).or_insert(0);
        *counter += 1;
        ResourceName::from(format!("{}{}", kind.name_prefix(), counter))
    }

    fn resolve_path_safe(&self, path: &str) -> Option<PathBuf> {
        if Path::new(path).is_absolute() {
            return None;
        }

        let full_path = self.base_path.join(path);

        if let Ok(canonical) = full_path.canonicalize()
            && let Some(ref base) = self.canonical_base
        {
            return canonical.starts_with(base).then_some(canonical);
        }

        // Not on disk yet: refuse any parent component outright.
        if Path::new(path)
            .components()
            .any(|c| matches!(c, Component::ParentDir))
        {
            return None;
        }

        Some(std::path::absolute(&full_path).unwrap_or(full_path))
    }
}

impl ResourceRegistry for DocumentResources {
    fn register(&mut self, resource: Resource) -> Result<ResourceName, ResourceError> {
        if resource.key.as_str().trim().is_empty() {
            return Err(ResourceError::Argument(
                "resource key must not be empty".to_string(),
            ));
        }
        let slot = (resource.kind(), resource.key.clone());
        if let Some(existing) = self.entries.get_mut(&slot) {
            existing.resource = resource;
            return Ok(existing.name.clone());
        }
        let name = self.next_name(slot.0);
        log::debug!("Registered {} '{}' as /{}", slot.0, slot.1, name);
        self.entries.insert(
            slot,
            RegisteredResource {
                name: name.clone(),
                resource,
            },
        );
        Ok(name)
    }

    fn resolve(&self, kind: ResourceKind, key: &ResourceKey) -> Option<&RegisteredResource> {
        self.entries.get(&(kind, key.clone()))
    }

    fn map_path(&self, relative: &str) -> Result<PathBuf, ResourceError> {
        if relative.trim().is_empty() {
            return Err(ResourceError::Argument("path must not be empty".to_string()));
        }
        self.resolve_path_safe(relative)
            .ok_or_else(|| ResourceError::PathTraversal(relative.to_string()))
    }
}
