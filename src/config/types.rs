use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "excludePatterns[0]")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NlsSettings {
    /// Glob (relative to the workspace) matching root message modules.
    /// `*` does not cross directory boundaries, so locale modules in
    /// `nls/<locale>/` are not picked up as roots.
    pub bundle_pattern: String,

    pub exclude_patterns: Vec<String>,

    /// Joins nested group keys (e.g. `error` + `azure-login`).
    pub key_separator: String,

    /// Keys the consuming application uses; each must be defined by root.
    pub required_keys: Vec<String>,

    /// Abort loading on validation issues instead of logging them.
    pub strict: bool,
}

impl Default for NlsSettings {
    fn default() -> Self {
        Self {
            bundle_pattern: "**/nls/*.{js,json}".to_string(),
            exclude_patterns: vec!["**/node_modules/**".to_string()],
            key_separator: ".".to_string(),
            required_keys: Vec::new(),
            strict: true,
        }
    }
}

impl NlsSettings {
    /// # Errors
    /// - Required field is empty
    /// - Invalid glob pattern
    /// - Empty required key
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.key_separator.is_empty() {
            errors.push(ValidationError::new(
                "keySeparator",
                "The separator cannot be empty. Please specify a separator, for example: \".\" (dot)",
            ));
        }

        if self.bundle_pattern.is_empty() {
            errors.push(ValidationError::new(
                "bundlePattern",
                "The pattern cannot be empty. Example: \"**/nls/*.{js,json}\"",
            ));
        } else if let Err(e) = globset::Glob::new(&self.bundle_pattern) {
            errors.push(ValidationError::new(
                "bundlePattern",
                format!("Invalid glob pattern '{}': {e}", self.bundle_pattern),
            ));
        }

        for (index, pattern) in self.exclude_patterns.iter().enumerate() {
            if let Err(e) = globset::Glob::new(pattern) {
                errors.push(ValidationError::new(
                    format!("excludePatterns[{index}]"),
                    format!("Invalid glob pattern '{pattern}': {e}"),
                ));
            }
        }

        for (index, key) in self.required_keys.iter().enumerate() {
            if key.trim().is_empty() {
                errors.push(ValidationError::new(
                    format!("requiredKeys[{index}]"),
                    "The key cannot be empty",
                ));
            }
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}
