//! Locale tag normalization and fallback chains.

use std::fmt;

/// Tag naming the root (default) bundle.
pub const ROOT_LOCALE: &str = "root";

/// A normalized locale identifier (e.g. `fr`, `fr-ca`).
///
/// Tags are lowercased and `_` is mapped to `-`, so `fr_FR`, `fr-FR` and
/// `fr-fr` name the same bundle. An empty tag is the root locale.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LocaleTag(String);

impl LocaleTag {
    /// Creates a normalized tag.
    #[must_use]
    pub fn new(tag: &str) -> Self {
        let normalized = normalize_locale(tag);
        if normalized.is_empty() { Self::root() } else { Self(normalized) }
    }

    /// The root locale.
    #[must_use]
    pub fn root() -> Self {
        Self(ROOT_LOCALE.to_string())
    }

    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0 == ROOT_LOCALE
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Locales to try, most specific first, before falling back to root.
    ///
    /// # Examples
    /// ```
    /// use nls_bundle::locale::LocaleTag;
    ///
    /// let chain = LocaleTag::new("fr_CA").fallback_chain();
    /// assert_eq!(chain, vec![LocaleTag::new("fr-ca"), LocaleTag::new("fr")]);
    /// assert!(LocaleTag::root().fallback_chain().is_empty());
    /// ```
    #[must_use]
    pub fn fallback_chain(&self) -> Vec<Self> {
        if self.is_root() {
            return Vec::new();
        }

        let mut chain = Vec::new();
        let mut current = self.0.as_str();
        loop {
            chain.push(Self(current.to_string()));
            match current.rfind('-').and_then(|pos| current.get(..pos)) {
                Some(parent) if !parent.is_empty() => current = parent,
                _ => break,
            }
        }
        chain
    }
}

impl fmt::Display for LocaleTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LocaleTag {
    fn from(tag: &str) -> Self {
        Self::new(tag)
    }
}

/// Normalize locale tag (trim, lowercase and replace _ with -)
fn normalize_locale(tag: &str) -> String {
    tag.trim().to_lowercase().replace('_', "-").trim_matches('-').to_string()
}
