//! An ordered collection of style items.

use crate::error::StyleError;
use crate::item::{StyleItem, StyleKind};
use crate::keys::StyleKey;

/// Items in declaration order. Several items of one kind may coexist until
/// the style is flattened.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Style {
    items: Vec<StyleItem>,
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses `prefix-name: value` declarations separated by `;`.
    ///
    /// The text before the first `-` selects the kind (`margin-top` is the
    /// `top` attribute of the Margins item). A bare `margin` or `padding`
    /// sets the `all` shorthand.
    pub fn from_declarations(text: &str) -> Result<Self, StyleError> {
        let mut style = Style::new();
        for declaration in text.split(';') {
            let declaration = declaration.trim();
            if declaration.is_empty() {
                continue;
            }
            let (property, value) = declaration.split_once(':').ok_or_else(|| {
                StyleError::Argument(format!("declaration '{declaration}' has no value"))
            })?;
            let property = property.trim().to_ascii_lowercase();
            let (prefix, name) = match property.split_once('-') {
                Some((prefix, name)) => (prefix, name),
                None => (property.as_str(), "all"),
            };
            let kind = StyleKind::from_prefix(prefix)
                .ok_or_else(|| StyleError::UnknownProperty(property.clone()))?;
            if name == "all" && !matches!(kind, StyleKind::Margins | StyleKind::Padding) {
                return Err(StyleError::UnknownProperty(property.clone()));
            }
            style.set(kind, name, value.trim())?;
        }
        Ok(style)
    }

    pub fn items(&self) -> &[StyleItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn push(&mut self, item: StyleItem) {
        self.items.push(item);
    }

    /// The first item of `kind`.
    pub fn item(&self, kind: StyleKind) -> Option<&StyleItem> {
        self.items.iter().find(|i| i.kind() == kind)
    }

    pub fn has_kind(&self, kind: StyleKind) -> bool {
        self.item(kind).is_some()
    }

    /// Returns the first item of `kind`, appending an empty one with the
    /// kind's default inheritance when none exists.
    pub fn get_or_create(&mut self, kind: StyleKind) -> &mut StyleItem {
        let index = match self.items.iter().position(|i| i.kind() == kind) {
            Some(index) => index,
            None => {
                self.items.push(StyleItem::new(kind));
                self.items.len() - 1
            }
        };
        &mut self.items[index]
    }

    pub fn set(
        &mut self,
        kind: StyleKind,
        key: &str,
        text: impl Into<String>,
    ) -> Result<(), StyleError> {
        self.get_or_create(kind).set(key, text)
    }

    /// Reads a typed value. Later items of the key's kind take precedence, so
    /// the result matches what `flatten` would produce.
    pub fn get<T>(&self, key: &StyleKey<T>) -> Result<Option<T>, StyleError>
    where
        T: Clone + Send + Sync + 'static,
    {
        match self
            .items
            .iter()
            .rev()
            .find(|i| i.kind() == key.kind && i.contains(key.name))
        {
            Some(item) => item.get(key.name, false, key.parse),
            None => Ok(None),
        }
    }

    /// Like `get`, but fails with `MissingAttribute` when unset.
    pub fn require<T>(&self, key: &StyleKey<T>) -> Result<T, StyleError>
    where
        T: Clone + Send + Sync + 'static,
    {
        self.get(key)?.ok_or_else(|| StyleError::MissingAttribute {
            key: format!("{key:?}"),
        })
    }

    /// Appends clones of `other`'s items; with `inherited_only` set, only the
    /// items flagged as inherited are taken.
    pub fn merge_from(&mut self, other: &Style, inherited_only: bool) {
        self.items.extend(
            other
                .items
                .iter()
                .filter(|item| !inherited_only || item.is_inherited())
                .cloned(),
        );
    }

    /// Collapses same-kind items into one per kind, in first-seen kind order.
    /// Later items overwrite earlier ones attribute by attribute.
    pub fn flatten(&self) -> Style {
        let mut flat: Vec<StyleItem> = Vec::new();
        for item in &self.items {
            match flat.iter_mut().find(|f| f.kind() == item.kind()) {
                // Kinds agree, so the merge cannot fail.
                Some(existing) => {
                    if let Err(e) = item.merge_into(existing) {
                        log::warn!("Skipping style item during flatten: {}", e);
                    }
                }
                None => flat.push(item.clone()),
            }
        }
        Style { items: flat }
    }

    pub fn is_flat(&self) -> bool {
        self.items
            .iter()
            .enumerate()
            .all(|(i, item)| !self.items[..i].iter().any(|p| p.kind() == item.kind()))
    }
}

impl FromIterator<StyleItem> for Style {
    fn from_iter<I: IntoIterator<Item = StyleItem>>(iter: I) -> Self {
        Style {
            items: iter.into_iter().collect(),
        }
    }
}
