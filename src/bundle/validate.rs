//! Load-time bundle validation

use std::fmt;

use super::{
    BundleSet,
    LocaleEntry,
};
use crate::locale::LocaleTag;

/// Kind of problem found in a bundle set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IssueKind {
    /// A locale bundle defines a key the root bundle does not (stale or renamed key)
    StaleKey,
    /// A key required by the application is missing from the root bundle
    MissingRootKey,
}

/// A validation finding for one key of one bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleIssue {
    pub bundle: String,
    pub locale: LocaleTag,
    pub key: String,
    pub kind: IssueKind,
}

impl fmt::Display for BundleIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            IssueKind::StaleKey => write!(
                f,
                "{} [{}]: key '{}' is not defined in the root bundle",
                self.bundle, self.locale, self.key
            ),
            IssueKind::MissingRootKey => write!(
                f,
                "{} [{}]: required key '{}' is missing",
                self.bundle, self.locale, self.key
            ),
        }
    }
}

impl BundleSet {
    /// Checks the set against the root bundle and the keys the application uses.
    ///
    /// Locale bundles may omit keys; they may not define keys root lacks. Every
    /// key in `required_keys` must be defined by root. Issues are ordered by
    /// locale, then key.
    #[must_use]
    pub fn validate(&self, required_keys: &[String]) -> Vec<BundleIssue> {
        let mut issues = Vec::new();

        let mut missing: Vec<&str> = required_keys
            .iter()
            .map(String::as_str)
            .filter(|key| !self.root().contains_key(key))
            .collect();
        missing.sort_unstable();
        missing.dedup();
        issues.extend(missing.into_iter().map(|key| BundleIssue {
            bundle: self.name().to_string(),
            locale: LocaleTag::root(),
            key: key.to_string(),
            kind: IssueKind::MissingRootKey,
        }));

        for (tag, entry) in self.locales() {
            let LocaleEntry::Overrides(bundle) = entry else {
                continue;
            };
            let mut stale: Vec<&str> =
                bundle.keys().filter(|key| !self.root().contains_key(key)).collect();
            stale.sort_unstable();
            issues.extend(stale.into_iter().map(|key| BundleIssue {
                bundle: self.name().to_string(),
                locale: tag.clone(),
                key: key.to_string(),
                kind: IssueKind::StaleKey,
            }));
        }

        issues
    }
}
