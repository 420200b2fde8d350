//! Configuration file loading

use std::path::Path;

use super::{
    ConfigError,
    NlsSettings,
};

/// Name of the configuration file looked up at the workspace root
pub const CONFIG_FILE_NAME: &str = ".nls-bundle.json";

/// Load settings from the workspace
///
/// Looks for a `.nls-bundle.json` file at the workspace root.
///
/// # Returns
/// - `Ok(Some(settings))`: the file exists and was parsed
/// - `Ok(None)`: no configuration file
/// - `Err(ConfigError)`: read or parse failure
pub(super) fn load_from_workspace(
    workspace_root: &Path,
) -> Result<Option<NlsSettings>, ConfigError> {
    let config_path = workspace_root.join(CONFIG_FILE_NAME);

    if !config_path.exists() {
        tracing::debug!("Configuration file not found: {:?}", config_path);
        return Ok(None);
    }

    tracing::debug!("Loading configuration from: {:?}", config_path);

    let content = std::fs::read_to_string(&config_path)?;
    let settings: NlsSettings = serde_json::from_str(&content)?;

    Ok(Some(settings))
}
