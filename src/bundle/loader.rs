//! Bundle set loading from message modules.

use std::path::{
    Path,
    PathBuf,
};

use serde_json::Value;

use super::{
    Bundle,
    BundleError,
    BundleSet,
    LocaleEntry,
    flatten_dictionary,
};
use crate::locale::{
    LocaleTag,
    ROOT_LOCALE,
};
use crate::syntax::{
    SourceFormat,
    parse_bundle_source,
};

/// Load a root message module and the locale modules it declares.
///
/// The module maps `root` to the default dictionary. Every other top-level key
/// is a locale: an object gives inline overrides, `true` reads the overrides
/// from `<dir>/<locale>/<file name>` (root verbatim when that file does not
/// exist) and `false` leaves the locale undeclared.
///
/// # Errors
/// - `BundleError::Io` if a file cannot be read
/// - `BundleError::InvalidBundleFormat` if a module is not a well-formed bundle
pub fn load_bundle_file(
    path: &Path,
    name: impl Into<String>,
    separator: &str,
) -> Result<BundleSet, BundleError> {
    tracing::debug!("Loading bundle from: {:?}", path);
    let value = read_module(path)?;
    let siblings = path.parent().zip(path.file_name()).map(|(dir, file)| (dir, Path::new(file)));
    build_bundle_set(name.into(), path, &value, separator, siblings)
}

/// Load a root message module from source text.
///
/// No sibling files are consulted: a locale declared `true` is an alias to root.
///
/// # Errors
/// Returns `BundleError::InvalidBundleFormat` if the source is not a well-formed bundle.
pub fn load_bundle_source(
    name: &str,
    source: &str,
    format: SourceFormat,
    separator: &str,
) -> Result<BundleSet, BundleError> {
    let origin = PathBuf::from(name);
    let value = parse_bundle_source(source, format)
        .map_err(|e| BundleError::invalid_format(&origin, e.to_string()))?;
    build_bundle_set(name.to_string(), &origin, &value, separator, None)
}

fn read_module(path: &Path) -> Result<Value, BundleError> {
    let format = SourceFormat::from_path(path)
        .ok_or_else(|| BundleError::invalid_format(path, "unsupported file extension"))?;
    let bytes =
        std::fs::read(path).map_err(|source| BundleError::Io { path: path.to_path_buf(), source })?;
    let content = String::from_utf8(bytes)
        .map_err(|e| BundleError::invalid_format(path, format!("not valid UTF-8: {e}")))?;
    parse_bundle_source(&content, format).map_err(|e| BundleError::invalid_format(path, e.to_string()))
}

fn build_bundle_set(
    name: String,
    origin: &Path,
    module: &Value,
    separator: &str,
    siblings: Option<(&Path, &Path)>,
) -> Result<BundleSet, BundleError> {
    let Value::Object(members) = module else {
        return Err(BundleError::invalid_format(origin, "module does not define an object"));
    };
    let root = members
        .get(ROOT_LOCALE)
        .ok_or_else(|| BundleError::invalid_format(origin, "missing 'root' dictionary"))?;
    let root_entries = flatten_dictionary(root, separator)
        .map_err(|message| BundleError::invalid_format(origin, format!("root: {message}")))?;

    let mut set = BundleSet::new(name, root_entries);

    for (locale_key, declaration) in members.iter().filter(|(key, _)| *key != ROOT_LOCALE) {
        let locale = LocaleTag::new(locale_key);
        let entry = match declaration {
            Value::Bool(false) => {
                tracing::debug!(locale = %locale, "Locale declared unavailable");
                continue;
            }
            Value::Bool(true) => match siblings {
                Some((dir, file_name)) => {
                    load_locale_file(&dir.join(locale_key).join(file_name), &locale, separator)?
                }
                None => LocaleEntry::AliasToRoot,
            },
            Value::Object(_) => {
                let entries = flatten_dictionary(declaration, separator).map_err(|message| {
                    BundleError::invalid_format(origin, format!("{locale_key}: {message}"))
                })?;
                LocaleEntry::Overrides(Bundle::new(locale.clone(), entries))
            }
            _ => {
                return Err(BundleError::invalid_format(
                    origin,
                    format!("locale '{locale_key}' must be a boolean or an object"),
                ));
            }
        };
        set = set.with_locale(locale, entry);
    }

    tracing::debug!(
        bundle = set.name(),
        keys = set.root().len(),
        locales = set.locales().count(),
        "Bundle loaded"
    );
    Ok(set)
}

/// Loads a locale module, a bare dictionary of overrides
fn load_locale_file(
    path: &Path,
    locale: &LocaleTag,
    separator: &str,
) -> Result<LocaleEntry, BundleError> {
    if !path.exists() {
        tracing::debug!("Locale file not found, using root verbatim: {:?}", path);
        return Ok(LocaleEntry::AliasToRoot);
    }

    tracing::debug!("Loading locale {} from: {:?}", locale, path);
    let value = read_module(path)?;
    let entries = flatten_dictionary(&value, separator)
        .map_err(|message| BundleError::invalid_format(path, message))?;
    Ok(LocaleEntry::Overrides(Bundle::new(locale.clone(), entries)))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use std::fs;

    use googletest::prelude::*;
    use rstest::rstest;
    use tempfile::TempDir;

    use super::*;
    use crate::test_utils::{
        AZURE_FR_MODULE,
        AZURE_ROOT_MODULE,
        write_file,
    };

    #[googletest::test]
    fn test_load_bundle_file_with_sibling_locale() {
        let temp_dir = TempDir::new().unwrap();
        let root_path = write_file(temp_dir.path(), "nls/messages.js", AZURE_ROOT_MODULE);
        write_file(temp_dir.path(), "nls/fr/messages.js", AZURE_FR_MODULE);

        let set = load_bundle_file(&root_path, "messages", ".").unwrap();

        expect_that!(set.name(), eq("messages"));
        expect_that!(set.root().len(), eq(9));
        expect_that!(set.root().get("error.azure-admin"), some(eq("Administrator access failed")));

        let Some(LocaleEntry::Overrides(fr)) = set.locale(&LocaleTag::new("fr")) else {
            panic!("fr should be loaded from the sibling file");
        };
        expect_that!(fr.len(), eq(8));
        expect_that!(fr.get("service:prov:azure:name"), some(eq("Nom")));
        expect_that!(fr.get("service:prov:azure:resource-group"), none());
    }

    #[googletest::test]
    fn test_load_bundle_file_without_sibling_is_alias() {
        let temp_dir = TempDir::new().unwrap();
        let root_path = write_file(temp_dir.path(), "nls/messages.js", AZURE_ROOT_MODULE);

        let set = load_bundle_file(&root_path, "messages", ".").unwrap();

        expect_that!(set.locale(&LocaleTag::new("fr")), some(eq(&LocaleEntry::AliasToRoot)));
    }

    #[googletest::test]
    fn test_load_bundle_file_json_with_inline_overrides() {
        let temp_dir = TempDir::new().unwrap();
        let root_path = write_file(
            temp_dir.path(),
            "nls/messages.json",
            r#"{
  "root": { "name": "Name", "error": { "login": "Login failed" } },
  "fr": { "name": "Nom" },
  "de": false
}"#,
        );

        let set = load_bundle_file(&root_path, "messages", "/").unwrap();

        expect_that!(set.root().get("error/login"), some(eq("Login failed")));
        expect_that!(set.locale(&LocaleTag::new("de")).is_none(), eq(true));
        expect_that!(set.resolve(&LocaleTag::new("fr"), "name").ok(), some(eq("Nom")));
    }

    #[rstest]
    fn test_load_bundle_source_alias_without_siblings() {
        let set = load_bundle_source(
            "messages",
            r#"define({ root: { "name": "Name" }, "fr": true });"#,
            SourceFormat::AmdModule,
            ".",
        )
        .unwrap();

        assert_eq!(set.locale(&LocaleTag::new("fr")), Some(&LocaleEntry::AliasToRoot));
        assert_eq!(set.resolve(&LocaleTag::new("fr"), "name").unwrap(), "Name");
    }

    #[rstest]
    #[case::missing_root(r#"define({ "fr": true });"#, "missing 'root' dictionary")]
    #[case::root_not_object(r#"define({ "root": "Name" });"#, "root: expected an object")]
    #[case::root_bad_leaf(r#"define({ "root": { "a": true } });"#, "root: value of 'a'")]
    #[case::locale_string(r#"define({ "root": {}, "fr": "yes" });"#, "locale 'fr' must be")]
    #[case::locale_bad_leaf(r#"define({ "root": {}, "fr": { "a": { "b": false } } });"#, "fr: value of 'a.b'")]
    #[case::not_a_module("var x = 1;", "No define(...) call")]
    fn test_load_bundle_source_invalid(#[case] source: &str, #[case] expected: &str) {
        let result = load_bundle_source("messages", source, SourceFormat::AmdModule, ".");

        match result {
            Err(BundleError::InvalidBundleFormat { path, message }) => {
                assert_eq!(path, PathBuf::from("messages"));
                assert!(message.contains(expected), "{message}");
            }
            other => panic!("expected InvalidBundleFormat, got {other:?}"),
        }
    }

    #[rstest]
    fn test_load_bundle_file_invalid_locale_module() {
        let temp_dir = TempDir::new().unwrap();
        let root_path = write_file(temp_dir.path(), "nls/messages.js", AZURE_ROOT_MODULE);
        let fr_path =
            write_file(temp_dir.path(), "nls/fr/messages.js", r#"define({ "name": 1 });"#);

        let result = load_bundle_file(&root_path, "messages", ".");

        match result {
            Err(BundleError::InvalidBundleFormat { path, .. }) => assert_eq!(path, fr_path),
            other => panic!("expected InvalidBundleFormat, got {other:?}"),
        }
    }

    #[rstest]
    fn test_load_bundle_file_not_utf8() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("messages.js");
        let mut content = br#"define({ "root": { "a": ""#.to_vec();
        content.extend_from_slice(&[0xff, 0xfe]);
        content.extend_from_slice(br#"" } });"#);
        fs::write(&path, content).unwrap();

        let result = load_bundle_file(&path, "messages", ".");

        match result {
            Err(BundleError::InvalidBundleFormat { path: error_path, message }) => {
                assert_eq!(error_path, path);
                assert!(message.contains("UTF-8"), "{message}");
            }
            other => panic!("expected InvalidBundleFormat, got {other:?}"),
        }
    }

    #[rstest]
    fn test_load_bundle_file_missing_file() {
        let temp_dir = TempDir::new().unwrap();

        let result = load_bundle_file(&temp_dir.path().join("messages.js"), "messages", ".");

        assert!(matches!(result, Err(BundleError::Io { .. })));
    }

    #[rstest]
    fn test_load_bundle_file_unsupported_extension() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("messages.properties");
        fs::write(&path, "name=Name").unwrap();

        let result = load_bundle_file(&path, "messages", ".");

        assert!(matches!(result, Err(BundleError::InvalidBundleFormat { .. })));
    }
}
