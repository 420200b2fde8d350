//! Workspace bundle catalog
//!
//! Discovers root message modules under a workspace, loads each into a
//! [`BundleSet`] keyed by module id and serves lookups across them.

use std::collections::BTreeMap;
use std::path::{
    Path,
    PathBuf,
};
use std::sync::atomic::{
    AtomicUsize,
    Ordering,
};
use std::sync::{
    Mutex,
    OnceLock,
    PoisonError,
};

use globset::{
    GlobBuilder,
    GlobSet,
    GlobSetBuilder,
};
use ignore::WalkBuilder;

use crate::bundle::{
    BundleError,
    BundleIssue,
    BundleSet,
    load_bundle_file,
};
use crate::config::NlsSettings;
use crate::locale::LocaleTag;

/// All bundle sets of a workspace, immutable once loaded.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    /// Module id → bundle set
    bundles: BTreeMap<String, BundleSet>,
}

impl Catalog {
    /// Discovers and loads every bundle of the workspace.
    ///
    /// In strict mode validation issues abort loading; otherwise they are
    /// logged as warnings.
    ///
    /// # Errors
    /// - A bundle fails to load (the whole catalog is rejected)
    /// - `BundleError::Validation` in strict mode
    /// - `BundleError::InvalidPattern` for unusable glob patterns
    /// - `BundleError::Discovery` if part of the workspace cannot be scanned
    pub fn load(workspace_root: &Path, settings: &NlsSettings) -> Result<Self, BundleError> {
        let (catalog, issues) = Self::load_unchecked(workspace_root, settings)?;

        if !issues.is_empty() {
            if settings.strict {
                return Err(BundleError::Validation(issues));
            }
            for issue in &issues {
                tracing::warn!("{issue}");
            }
        }

        Ok(catalog)
    }

    /// Loads every bundle and returns the validation issues without acting on them.
    ///
    /// # Errors
    /// - A bundle fails to load
    /// - `BundleError::InvalidPattern` for unusable glob patterns
    /// - `BundleError::Discovery` if part of the workspace cannot be scanned
    pub fn load_unchecked(
        workspace_root: &Path,
        settings: &NlsSettings,
    ) -> Result<(Self, Vec<BundleIssue>), BundleError> {
        tracing::debug!(workspace_root = %workspace_root.display(), "Loading bundle catalog");

        let mut bundles = BTreeMap::new();
        let mut issues = Vec::new();
        for path in find_bundle_files(workspace_root, settings)? {
            let module_id = module_id(workspace_root, &path);
            let set = load_bundle_file(&path, module_id.clone(), &settings.key_separator)?;
            issues.extend(set.validate(&settings.required_keys));
            bundles.insert(module_id, set);
        }

        tracing::debug!(bundles = bundles.len(), issues = issues.len(), "Bundle catalog loaded");
        Ok((Self { bundles }, issues))
    }

    /// Builds a catalog from already loaded sets, keyed by their names.
    #[must_use]
    pub fn from_sets(sets: impl IntoIterator<Item = BundleSet>) -> Self {
        Self { bundles: sets.into_iter().map(|set| (set.name().to_string(), set)).collect() }
    }

    #[must_use]
    pub fn bundle(&self, module: &str) -> Option<&BundleSet> {
        self.bundles.get(module)
    }

    /// Like [`Catalog::bundle`], failing for unknown module ids.
    ///
    /// # Errors
    /// Returns `BundleError::UnknownBundle` if no bundle has this module id.
    pub fn require_bundle(&self, module: &str) -> Result<&BundleSet, BundleError> {
        self.bundle(module).ok_or_else(|| BundleError::UnknownBundle(module.to_string()))
    }

    /// Module ids, sorted.
    pub fn modules(&self) -> impl Iterator<Item = &str> {
        self.bundles.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bundles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bundles.is_empty()
    }

    /// Resolves `key` in the bundle `module` for `locale`.
    ///
    /// # Errors
    /// - `BundleError::UnknownBundle` if no bundle has this module id
    /// - `BundleError::MissingTranslationKey` if root lacks the key
    pub fn resolve(&self, module: &str, locale: &LocaleTag, key: &str) -> Result<&str, BundleError> {
        self.require_bundle(module)?.resolve(locale, key)
    }

    /// Validation issues of every bundle, in module order.
    #[must_use]
    pub fn validate(&self, required_keys: &[String]) -> Vec<BundleIssue> {
        self.bundles.values().flat_map(|set| set.validate(required_keys)).collect()
    }
}

/// A catalog loaded on first access.
///
/// Concurrent first accesses wait for a single load and share its result.
#[derive(Debug)]
pub struct LazyCatalog {
    /// Workspace scanned on first access
    workspace_root: PathBuf,
    /// Settings used for the load
    settings: NlsSettings,
    /// Set once by the first successful load
    catalog: OnceLock<Catalog>,
    /// Serializes loads so the workspace is read once
    load_lock: Mutex<()>,
    /// Loads attempted, failed ones included
    load_count: AtomicUsize,
}

impl LazyCatalog {
    #[must_use]
    pub fn new(workspace_root: impl Into<PathBuf>, settings: NlsSettings) -> Self {
        Self {
            workspace_root: workspace_root.into(),
            settings,
            catalog: OnceLock::new(),
            load_lock: Mutex::new(()),
            load_count: AtomicUsize::new(0),
        }
    }

    /// Returns the catalog, loading it if this is the first successful access.
    ///
    /// A failed load is not cached; the next call retries.
    ///
    /// # Errors
    /// Same as [`Catalog::load`].
    pub fn get(&self) -> Result<&Catalog, BundleError> {
        if let Some(catalog) = self.catalog.get() {
            return Ok(catalog);
        }

        let _guard = self.load_lock.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(catalog) = self.catalog.get() {
            return Ok(catalog);
        }
        self.load_count.fetch_add(1, Ordering::Relaxed);
        let loaded = Catalog::load(&self.workspace_root, &self.settings)?;
        Ok(self.catalog.get_or_init(|| loaded))
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.catalog.get().is_some()
    }

    /// Number of workspace loads attempted so far.
    #[must_use]
    pub fn load_count(&self) -> usize {
        self.load_count.load(Ordering::Relaxed)
    }
}

/// Builds a glob set where `*` does not match `/`
fn build_glob_set(patterns: &[String]) -> Result<GlobSet, BundleError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = GlobBuilder::new(pattern).literal_separator(true).build().map_err(|e| {
            BundleError::InvalidPattern(format!("Invalid pattern '{pattern}': {e}"))
        })?;
        builder.add(glob);
    }
    builder
        .build()
        .map_err(|e| BundleError::InvalidPattern(format!("Failed to build patterns: {e}")))
}

/// Finds root message modules under the workspace, sorted by path
fn find_bundle_files(
    workspace_root: &Path,
    settings: &NlsSettings,
) -> Result<Vec<PathBuf>, BundleError> {
    let include_set = build_glob_set(std::slice::from_ref(&settings.bundle_pattern))?;
    let exclude_set = build_glob_set(&settings.exclude_patterns)?;

    let mut found_files = Vec::new();
    for result in WalkBuilder::new(workspace_root)
        .hidden(false)
        .git_ignore(true)
        .git_global(false)
        .git_exclude(true)
        .follow_links(false)
        .build()
    {
        let entry = result.map_err(|err| {
            tracing::debug!(?err, "Failed to read directory entry");
            BundleError::Discovery(err)
        })?;

        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }

        let path = entry.path();
        let Ok(relative_path) = path.strip_prefix(workspace_root) else {
            continue;
        };
        if !include_set.is_match(relative_path) || exclude_set.is_match(relative_path) {
            continue;
        }

        found_files.push(path.to_path_buf());
    }

    found_files.sort();
    tracing::debug!(count = found_files.len(), "Found bundle files");
    Ok(found_files)
}

/// Workspace-relative, `/`-separated path without extension
fn module_id(workspace_root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(workspace_root).unwrap_or(path).with_extension("");
    relative
        .components()
        .map(|component| component.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
