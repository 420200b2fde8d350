//! Bundle data model

use std::collections::{
    BTreeMap,
    HashMap,
};

use crate::locale::LocaleTag;

/// Key to display string translations for one locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bundle {
    locale: LocaleTag,

    /// Flattened translation key map (e.g., "error.azure-login" -> "Authentication failed").
    entries: HashMap<String, String>,
}

impl Bundle {
    #[must_use]
    pub const fn new(locale: LocaleTag, entries: HashMap<String, String>) -> Self {
        Self { locale, entries }
    }

    #[must_use]
    pub const fn locale(&self) -> &LocaleTag {
        &self.locale
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// How a declared locale is served.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocaleEntry {
    /// Partial overrides; missing keys fall back
    Overrides(Bundle),
    /// Identical to root, no overrides
    AliasToRoot,
}

/// A root bundle plus its locale bundles, immutable once built.
///
/// The root bundle's key set is the universal key set: a key missing from a
/// locale bundle resolves to the root value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleSet {
    /// Bundle identifier (module id when discovered in a workspace)
    name: String,
    root: Bundle,
    locales: BTreeMap<LocaleTag, LocaleEntry>,
}

impl BundleSet {
    #[must_use]
    pub fn new(name: impl Into<String>, root_entries: HashMap<String, String>) -> Self {
        Self {
            name: name.into(),
            root: Bundle::new(LocaleTag::root(), root_entries),
            locales: BTreeMap::new(),
        }
    }

    /// Declares a locale. The root tag cannot be redeclared and is ignored.
    #[must_use]
    pub fn with_locale(mut self, locale: LocaleTag, entry: LocaleEntry) -> Self {
        if locale.is_root() {
            tracing::warn!(bundle = %self.name, "Ignoring locale entry named after the root bundle");
            return self;
        }
        let entry = match entry {
            LocaleEntry::Overrides(bundle) if bundle.locale() != &locale => {
                LocaleEntry::Overrides(Bundle::new(locale.clone(), bundle.entries))
            }
            other => other,
        };
        self.locales.insert(locale, entry);
        self
    }

    /// Declares a locale from its override entries.
    #[must_use]
    pub fn with_overrides(self, locale: &str, entries: HashMap<String, String>) -> Self {
        let locale = LocaleTag::new(locale);
        let bundle = Bundle::new(locale.clone(), entries);
        self.with_locale(locale, LocaleEntry::Overrides(bundle))
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn root(&self) -> &Bundle {
        &self.root
    }

    /// Entry declared for exactly this locale (no fallback).
    #[must_use]
    pub fn locale(&self, locale: &LocaleTag) -> Option<&LocaleEntry> {
        self.locales.get(locale)
    }

    /// Declared locales, sorted.
    pub fn locales(&self) -> impl Iterator<Item = (&LocaleTag, &LocaleEntry)> {
        self.locales.iter()
    }
}
