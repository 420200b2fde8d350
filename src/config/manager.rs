//! Settings management

use std::path::Path;

use super::{
    ConfigError,
    NlsSettings,
    loader,
};

/// Holds the validated settings of a workspace
#[derive(Default, Debug, Clone)]
pub struct ConfigManager {
    /// Settings of the last successful load
    current_settings: NlsSettings,
}

impl ConfigManager {
    #[must_use]
    pub fn new() -> Self {
        Self { current_settings: NlsSettings::default() }
    }

    /// Loads and validates the settings of a workspace, falling back to
    /// defaults when it has no configuration file.
    ///
    /// # Errors
    /// - File read error
    /// - JSON parse error
    /// - Validation errors
    pub fn load_settings(&mut self, workspace_root: Option<&Path>) -> Result<(), ConfigError> {
        tracing::debug!("Loading settings for workspace: {:?}", workspace_root);

        let settings = if let Some(root) = workspace_root {
            loader::load_from_workspace(root)?.map_or_else(NlsSettings::default, |ws| {
                tracing::debug!("Loaded workspace settings: {:?}", ws);
                ws
            })
        } else {
            NlsSettings::default()
        };

        settings.validate().map_err(ConfigError::ValidationErrors)?;

        self.current_settings = settings;
        tracing::debug!("Settings loaded successfully: {:?}", self.current_settings);

        Ok(())
    }

    #[must_use]
    pub const fn get_settings(&self) -> &NlsSettings {
        &self.current_settings
    }
}
