//! Style items: one typed bag of attributes per visual aspect.

use crate::attribute::StyleAttribute;
use crate::error::StyleError;
use crate::parsers::StyleParseError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// The visual aspect a style item describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StyleKind {
    Fill,
    Stroke,
    Font,
    Border,
    Background,
    Position,
    Text,
    Page,
    Overflow,
    Outline,
    Clip,
    Transform,
    Margins,
    Padding,
}

impl StyleKind {
    pub const ALL: [StyleKind; 14] = [
        StyleKind::Fill,
        StyleKind::Stroke,
        StyleKind::Font,
        StyleKind::Border,
        StyleKind::Background,
        StyleKind::Position,
        StyleKind::Text,
        StyleKind::Page,
        StyleKind::Overflow,
        StyleKind::Outline,
        StyleKind::Clip,
        StyleKind::Transform,
        StyleKind::Margins,
        StyleKind::Padding,
    ];

    /// Whether items of this kind flow from ancestors to descendants.
    pub fn inherited_by_default(self) -> bool {
        match self {
            StyleKind::Fill | StyleKind::Font | StyleKind::Stroke | StyleKind::Text => true,
            StyleKind::Border
            | StyleKind::Background
            | StyleKind::Position
            | StyleKind::Page
            | StyleKind::Overflow
            | StyleKind::Outline
            | StyleKind::Clip
            | StyleKind::Transform
            | StyleKind::Margins
            | StyleKind::Padding => false,
        }
    }

    /// The property prefix used in declaration text (`fill-color`, `margin-top`).
    pub fn prefix(self) -> &'static str {
        match self {
            StyleKind::Fill => "fill",
            StyleKind::Stroke => "stroke",
            StyleKind::Font => "font",
            StyleKind::Border => "border",
            StyleKind::Background => "background",
            StyleKind::Position => "position",
            StyleKind::Text => "text",
            StyleKind::Page => "page",
            StyleKind::Overflow => "overflow",
            StyleKind::Outline => "outline",
            StyleKind::Clip => "clip",
            StyleKind::Transform => "transform",
            StyleKind::Margins => "margin",
            StyleKind::Padding => "padding",
        }
    }

    pub fn from_prefix(prefix: &str) -> Option<StyleKind> {
        StyleKind::ALL.into_iter().find(|k| k.prefix() == prefix)
    }
}

/// A kind-tagged set of attributes. Keys are unique within one item.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleItem {
    kind: StyleKind,
    inherited: bool,
    attributes: IndexMap<String, StyleAttribute>,
}

impl StyleItem {
    /// Creates an empty item with the kind's default inheritance.
    pub fn new(kind: StyleKind) -> Self {
        Self::with_inheritance(kind, kind.inherited_by_default())
    }

    pub fn with_inheritance(kind: StyleKind, inherited: bool) -> Self {
        Self {
            kind,
            inherited,
            attributes: IndexMap::new(),
        }
    }

    pub fn kind(&self) -> StyleKind {
        self.kind
    }

    pub fn is_inherited(&self) -> bool {
        self.inherited
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.attributes.contains_key(key)
    }

    pub fn attribute(&self, key: &str) -> Option<&StyleAttribute> {
        self.attributes.get(key)
    }

    pub fn attributes(&self) -> impl Iterator<Item = &StyleAttribute> {
        self.attributes.values()
    }

    /// Stores raw text for `key`, replacing any previous value.
    pub fn set(&mut self, key: &str, text: impl Into<String>) -> Result<(), StyleError> {
        let key = checked_key(key)?;
        self.attributes
            .insert(key.to_string(), StyleAttribute::new(key, text));
        Ok(())
    }

    /// Stores raw text together with its already-parsed value.
    pub fn set_parsed<T>(
        &mut self,
        key: &str,
        text: impl Into<String>,
        value: T,
    ) -> Result<(), StyleError>
    where
        T: Send + Sync + 'static,
    {
        let key = checked_key(key)?;
        self.attributes.insert(
            key.to_string(),
            StyleAttribute::with_value(key, text, value),
        );
        Ok(())
    }

    pub fn remove(&mut self, key: &str) -> Option<StyleAttribute> {
        self.attributes.shift_remove(key)
    }

    /// Reads a typed attribute value.
    ///
    /// Returns `Ok(None)` when the attribute is unset and not `required`, so the
    /// caller can fall back to its default.
    pub fn get<T, F>(&self, key: &str, required: bool, parse: F) -> Result<Option<T>, StyleError>
    where
        T: Clone + Send + Sync + 'static,
        F: FnOnce(&str) -> Result<T, StyleParseError>,
    {
        let Some(attribute) = self.attributes.get(key) else {
            if required {
                return Err(StyleError::MissingAttribute {
                    key: self.qualified(key),
                });
            }
            return Ok(None);
        };
        attribute
            .value(parse)
            .map(Some)
            .map_err(|e| StyleError::TypeConversion {
                key: self.qualified(key),
                target: std::any::type_name::<T>(),
                message: e.to_string(),
            })
    }

    /// Copies this item's attributes onto `other`; on a key collision the value
    /// from `self` wins.
    pub fn merge_into(&self, other: &mut StyleItem) -> Result<(), StyleError> {
        if self.kind != other.kind {
            return Err(StyleError::KindMismatch {
                source_kind: self.kind,
                target_kind: other.kind,
            });
        }
        for (key, attribute) in &self.attributes {
            other.attributes.insert(key.clone(), attribute.clone());
        }
        Ok(())
    }

    fn qualified(&self, key: &str) -> String {
        format!("{}-{}", self.kind.prefix(), key)
    }
}

fn checked_key(key: &str) -> Result<&str, StyleError> {
    let key = key.trim();
    if key.is_empty() {
        return Err(StyleError::Argument(
            "style attribute key must not be empty".to_string(),
        ));
    }
    Ok(key)
}
