//! Test fixtures shared by the unit test modules.
#![cfg(test)]
#![allow(clippy::unwrap_used)]

use std::collections::HashMap;
use std::fs;
use std::path::{
    Path,
    PathBuf,
};

use crate::bundle::{
    BundleSet,
    flatten_dictionary,
    load_bundle_source,
};
use crate::syntax::{
    SourceFormat,
    parse_define_module,
};

/// Module id of the Azure provisioning bundle
pub(crate) const AZURE_MODULE_ID: &str = "service/prov/azure/nls/messages";

/// Root module of the Azure provisioning bundle
pub(crate) const AZURE_ROOT_MODULE: &str =
    include_str!("../tests/fixtures/webjars/service/prov/azure/nls/messages.js");

/// French locale module of the Azure provisioning bundle
pub(crate) const AZURE_FR_MODULE: &str =
    include_str!("../tests/fixtures/webjars/service/prov/azure/nls/fr/messages.js");

/// Builds a key map from pairs
pub(crate) fn entries(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect()
}

/// The Azure bundle with its French overrides, as loaded from the fixtures
pub(crate) fn azure_bundle_set() -> BundleSet {
    let set =
        load_bundle_source(AZURE_MODULE_ID, AZURE_ROOT_MODULE, SourceFormat::AmdModule, ".").unwrap();
    let fr = parse_define_module(AZURE_FR_MODULE).unwrap();
    set.with_overrides("fr", flatten_dictionary(&fr, ".").unwrap())
}

/// Writes `content` to `relative` under `dir`, creating parent directories
pub(crate) fn write_file(dir: &Path, relative: &str, content: &str) -> PathBuf {
    let path = dir.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
    path
}
