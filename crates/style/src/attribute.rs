//! A single raw style value with a lazily parsed, memoized typed form.

use crate::parsers::StyleParseError;
use once_cell::sync::OnceCell;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

type ParsedValue = Arc<dyn Any + Send + Sync>;

/// Raw attribute text plus the cached result of the first successful parse.
///
/// The raw text is always retained. Once a typed value has been cached it is
/// returned for every later read of the same type without parsing again.
#[derive(Clone)]
pub struct StyleAttribute {
    key: String,
    raw: String,
    parsed: OnceCell<ParsedValue>,
}

impl StyleAttribute {
    pub fn new(key: impl Into<String>, raw: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            raw: raw.into(),
            parsed: OnceCell::new(),
        }
    }

    /// Creates an attribute whose typed value is already known.
    pub fn with_value<T>(key: impl Into<String>, raw: impl Into<String>, value: T) -> Self
    where
        T: Send + Sync + 'static,
    {
        let parsed = OnceCell::new();
        let _ = parsed.set(Arc::new(value) as ParsedValue);
        Self {
            key: key.into(),
            raw: raw.into(),
            parsed,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn is_parsed(&self) -> bool {
        self.parsed.get().is_some()
    }

    /// Returns the typed value, parsing and caching it on first use.
    ///
    /// A value cached under a different type is left in place; the text is
    /// parsed again for the requested type without being cached.
    pub fn value<T, F>(&self, parse: F) -> Result<T, StyleParseError>
    where
        T: Clone + Send + Sync + 'static,
        F: FnOnce(&str) -> Result<T, StyleParseError>,
    {
        if let Some(cached) = self.parsed.get() {
            return match cached.downcast_ref::<T>() {
                Some(value) => Ok(value.clone()),
                None => parse(&self.raw),
            };
        }
        let value = parse(&self.raw)?;
        let _ = self.parsed.set(Arc::new(value.clone()) as ParsedValue);
        Ok(value)
    }
}

impl PartialEq for StyleAttribute {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key && self.raw == other.raw
    }
}

impl fmt::Debug for StyleAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StyleAttribute")
            .field("key", &self.key)
            .field("raw", &self.raw)
            .field("parsed", &self.is_parsed())
            .finish()
    }
}
