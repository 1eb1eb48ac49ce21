//! Core types for islcodec.
//! The parser decodes into these; the binary codec and the text renderer
//! serialize them back out.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// All translated variants of one string: locale name → translated text.
///
/// Keys are locale identifiers as they appear in the source (`en`,
/// `pt_BR`, ...); values may contain real newline characters produced by
/// unescaping `\n` sequences.
pub type LocaleMap = HashMap<String, String>;

/// A complete translation set: string id → [`LocaleMap`].
///
/// This is the shared model between the ISL text format and the binary
/// lookup format. Iteration order is unspecified; a later insert for the
/// same (string id, locale) pair overwrites the earlier value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Translations {
    entries: HashMap<String, LocaleMap>,
}

impl Translations {
    /// Creates an empty translation set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ensures a string id exists, with an empty locale map if it is new.
    ///
    /// The parser calls this the moment a string id token is recognized,
    /// before any value has been seen for it.
    pub fn declare(&mut self, id: impl Into<String>) {
        self.entries.entry(id.into()).or_default();
    }

    /// Sets the value for one (string id, locale) pair, overwriting any
    /// earlier value. The string id must have been declared first; an
    /// undeclared id is ignored.
    pub fn set(&mut self, id: &str, locale: impl Into<String>, value: impl Into<String>) {
        if let Some(locales) = self.entries.get_mut(id) {
            locales.insert(locale.into(), value.into());
        }
    }

    /// Returns the locale map for a string id, if present.
    pub fn get(&self, id: &str) -> Option<&LocaleMap> {
        self.entries.get(id)
    }

    /// Returns one translated value, if present.
    pub fn value(&self, id: &str, locale: &str) -> Option<&str> {
        self.entries
            .get(id)
            .and_then(|locales| locales.get(locale))
            .map(String::as_str)
    }

    /// Number of string ids in the set.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over (string id, locale map) pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &LocaleMap)> {
        self.entries.iter()
    }

    /// Total number of (string id, locale) pairs across the whole set.
    pub fn pair_count(&self) -> usize {
        self.entries.values().map(HashMap::len).sum()
    }
}

impl FromIterator<(String, LocaleMap)> for Translations {
    fn from_iter<I: IntoIterator<Item = (String, LocaleMap)>>(iter: I) -> Self {
        Translations {
            entries: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Translations {
    type Item = (String, LocaleMap);
    type IntoIter = std::collections::hash_map::IntoIter<String, LocaleMap>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
