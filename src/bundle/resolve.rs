//! Key resolution with locale fallback

use std::collections::BTreeMap;

use super::{
    Bundle,
    BundleError,
    BundleSet,
    LocaleEntry,
};
use crate::locale::LocaleTag;

impl BundleSet {
    /// Resolves `key` for `locale`.
    ///
    /// Walks the locale's fallback chain (`fr-ca`, then `fr`) and returns the
    /// first override found. An `AliasToRoot` entry stops the walk. Anything
    /// not overridden comes from the root bundle.
    ///
    /// # Examples
    /// ```
    /// use std::collections::HashMap;
    /// use nls_bundle::bundle::BundleSet;
    /// use nls_bundle::locale::LocaleTag;
    ///
    /// let set = BundleSet::new("messages", HashMap::from([
    ///     ("service:prov:azure:name".to_string(), "Name".to_string()),
    ///     ("service:prov:azure:location".to_string(), "Location".to_string()),
    /// ]))
    /// .with_overrides("fr", HashMap::from([
    ///     ("service:prov:azure:name".to_string(), "Nom".to_string()),
    /// ]));
    ///
    /// let fr = LocaleTag::new("fr");
    /// assert_eq!(set.resolve(&fr, "service:prov:azure:name").unwrap(), "Nom");
    /// assert_eq!(set.resolve(&fr, "service:prov:azure:location").unwrap(), "Location");
    /// ```
    ///
    /// # Errors
    /// Returns `BundleError::MissingTranslationKey` if no bundle on the path,
    /// root included, defines the key.
    pub fn resolve(&self, locale: &LocaleTag, key: &str) -> Result<&str, BundleError> {
        for bundle in self.override_chain(locale) {
            if let Some(value) = bundle.get(key) {
                return Ok(value);
            }
        }

        self.root().get(key).ok_or_else(|| BundleError::MissingTranslationKey {
            bundle: self.name().to_string(),
            locale: locale.clone(),
            key: key.to_string(),
        })
    }

    /// The merged dictionary served for `locale`: root values overlaid by every
    /// override on the fallback chain, most specific last.
    #[must_use]
    pub fn effective_bundle(&self, locale: &LocaleTag) -> BTreeMap<&str, &str> {
        let mut merged: BTreeMap<&str, &str> = self.root().entries().collect();
        for bundle in self.override_chain(locale).into_iter().rev() {
            merged.extend(bundle.entries());
        }
        merged
    }

    /// Override bundles consulted for `locale`, most specific first
    fn override_chain(&self, locale: &LocaleTag) -> Vec<&Bundle> {
        let mut chain = Vec::new();
        for tag in locale.fallback_chain() {
            match self.locale(&tag) {
                Some(LocaleEntry::Overrides(bundle)) => chain.push(bundle),
                Some(LocaleEntry::AliasToRoot) => break,
                None => {}
            }
        }
        chain
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;
    use crate::test_utils::{
        azure_bundle_set,
        entries,
    };

    const ROOT_KEYS: &[&str] = &[
        "service:prov:azure:application",
        "service:prov:azure:key",
        "service:prov:azure:tenant",
        "service:prov:azure:name",
        "service:prov:azure:subscription",
        "service:prov:azure:location",
        "service:prov:azure:resource-group",
        "error.azure-login",
        "error.azure-admin",
    ];

    #[rstest]
    fn test_resolve_root_returns_root_values() {
        let set = azure_bundle_set();
        let root = LocaleTag::root();

        for key in ROOT_KEYS {
            assert_eq!(set.resolve(&root, key).ok(), set.root().get(key));
        }
    }

    #[googletest::test]
    fn test_resolve_locale_prefers_overrides() {
        let set = azure_bundle_set();
        let fr = LocaleTag::new("fr");
        let Some(LocaleEntry::Overrides(bundle)) = set.locale(&fr) else {
            panic!("fr bundle is not loaded as overrides");
        };

        for (key, value) in bundle.entries() {
            expect_that!(set.resolve(&fr, key).ok(), some(eq(value)));
        }
    }

    #[rstest]
    fn test_resolve_missing_locale_key_falls_back_to_root() {
        let set = azure_bundle_set();
        let fr = LocaleTag::new("fr");
        let root = LocaleTag::root();

        for key in ROOT_KEYS {
            let in_fr =
                matches!(set.locale(&fr), Some(LocaleEntry::Overrides(b)) if b.contains_key(key));
            if !in_fr {
                assert_eq!(set.resolve(&fr, key).ok(), set.resolve(&root, key).ok());
            }
        }
    }

    #[rstest]
    #[case::overridden_name("fr", "service:prov:azure:name", "Nom")]
    #[case::overridden_tenant("fr", "service:prov:azure:tenant", "Directory ID")]
    #[case::fallback_resource_group("fr", "service:prov:azure:resource-group", "Resource Group")]
    #[case::nested_error("fr", "error.azure-login", "Authentication échouée")]
    #[case::region_uses_language("fr-CA", "service:prov:azure:location", "Emplacement")]
    #[case::undefined_locale("de", "service:prov:azure:name", "Name")]
    #[case::root("root", "service:prov:azure:tenant", "Tenant ID")]
    fn test_resolve_scenarios(#[case] locale: &str, #[case] key: &str, #[case] expected: &str) {
        let set = azure_bundle_set();
        assert_eq!(set.resolve(&LocaleTag::new(locale), key).unwrap(), expected);
    }

    #[rstest]
    fn test_resolve_is_idempotent() {
        let set = azure_bundle_set();
        let fr = LocaleTag::new("fr");

        let first = set.resolve(&fr, "service:prov:azure:key").ok();
        let second = set.resolve(&fr, "service:prov:azure:key").ok();

        assert_eq!(first, second);
    }

    #[rstest]
    fn test_resolve_undefined_locale_matches_root_for_every_key() {
        let set = azure_bundle_set();
        let de = LocaleTag::new("de");

        for key in ROOT_KEYS {
            assert_eq!(set.resolve(&de, key).ok(), set.root().get(key));
        }
    }

    #[rstest]
    fn test_resolve_missing_root_key() {
        let set = azure_bundle_set();

        let result = set.resolve(&LocaleTag::new("fr"), "service:prov:azure:unknown");

        match result {
            Err(BundleError::MissingTranslationKey { bundle, locale, key }) => {
                assert_eq!(bundle, "service/prov/azure/nls/messages");
                assert_eq!(locale.as_str(), "fr");
                assert_eq!(key, "service:prov:azure:unknown");
            }
            other => panic!("expected MissingTranslationKey, got {other:?}"),
        }
    }

    #[rstest]
    fn test_resolve_locale_only_key() {
        let set = BundleSet::new("messages", entries(&[("name", "Name")]))
            .with_overrides("fr", entries(&[("stale", "Ancien")]));

        assert_eq!(set.resolve(&LocaleTag::new("fr"), "stale").unwrap(), "Ancien");
        assert!(set.resolve(&LocaleTag::root(), "stale").is_err());
    }

    #[rstest]
    fn test_resolve_alias_stops_fallback_chain() {
        let set = BundleSet::new("messages", entries(&[("name", "Name")]))
            .with_overrides("fr", entries(&[("name", "Nom")]))
            .with_locale(LocaleTag::new("fr-ca"), LocaleEntry::AliasToRoot);

        assert_eq!(set.resolve(&LocaleTag::new("fr-ca"), "name").unwrap(), "Name");
        assert_eq!(set.resolve(&LocaleTag::new("fr-ch"), "name").unwrap(), "Nom");
    }

    #[rstest]
    fn test_resolve_most_specific_override_wins() {
        let set = BundleSet::new("messages", entries(&[("name", "Name"), ("key", "Key")]))
            .with_overrides("fr", entries(&[("name", "Nom"), ("key", "Clé")]))
            .with_overrides("fr-ca", entries(&[("name", "Nom (CA)")]));

        let fr_ca = LocaleTag::new("fr-ca");
        assert_eq!(set.resolve(&fr_ca, "name").unwrap(), "Nom (CA)");
        assert_eq!(set.resolve(&fr_ca, "key").unwrap(), "Clé");
    }

    #[rstest]
    fn test_effective_bundle_merges_chain() {
        let root = entries(&[("name", "Name"), ("key", "Key"), ("tenant", "Tenant")]);
        let set = BundleSet::new("messages", root)
            .with_overrides("fr", entries(&[("name", "Nom"), ("key", "Clé")]))
            .with_overrides("fr-ca", entries(&[("name", "Nom (CA)")]));

        let merged = set.effective_bundle(&LocaleTag::new("fr-ca"));

        assert_eq!(
            merged,
            BTreeMap::from([("key", "Clé"), ("name", "Nom (CA)"), ("tenant", "Tenant")])
        );
    }

    #[rstest]
    fn test_effective_bundle_agrees_with_resolve() {
        let set = azure_bundle_set();
        let fr = LocaleTag::new("fr");

        for (key, value) in set.effective_bundle(&fr) {
            assert_eq!(set.resolve(&fr, key).unwrap(), value);
        }
    }
}
