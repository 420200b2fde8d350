use std::path::PathBuf;

use thiserror::Error;

use super::BundleIssue;
use crate::locale::LocaleTag;

/// Errors raised while loading or resolving message bundles
#[derive(Error, Debug)]
pub enum BundleError {
    /// The key is absent from the root bundle, which indicates a packaging defect
    #[error("Translation key '{key}' is missing from the root bundle of '{bundle}' (locale '{locale}')")]
    MissingTranslationKey { bundle: String, locale: LocaleTag, key: String },

    /// The bundle source does not have the expected key to string shape
    #[error("Invalid bundle format in '{}': {message}", path.display())]
    InvalidBundleFormat { path: PathBuf, message: String },

    #[error("Failed to read bundle file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unknown bundle '{0}'")]
    UnknownBundle(String),

    /// The workspace could not be fully scanned for bundles
    #[error("Failed to scan workspace: {0}")]
    Discovery(#[source] ignore::Error),

    #[error("Invalid bundle pattern: {0}")]
    InvalidPattern(String),

    #[error("Bundle validation failed:\n{}", format_issues(.0))]
    Validation(Vec<BundleIssue>),
}

fn format_issues(issues: &[BundleIssue]) -> String {
    issues
        .iter()
        .enumerate()
        .map(|(i, issue)| format!("  {}. {issue}", i + 1))
        .collect::<Vec<_>>()
        .join("\n")
}

impl BundleError {
    pub(crate) fn invalid_format(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::InvalidBundleFormat { path: path.into(), message: message.into() }
    }
}
