//! Bundle source parsing.
//!
//! Turns a bundle definition (an AMD `define({...})` module or a JSON
//! document) into a [`serde_json::Value`] tree. Interpreting that tree as
//! root and locale dictionaries is the job of [`crate::bundle`].

mod amd;
mod error;

use std::path::Path;

use serde_json::Value;

pub use amd::parse_define_module;
pub use error::SyntaxError;

/// Supported bundle source formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceFormat {
    /// JavaScript module calling `define({...})`
    AmdModule,
    /// Plain JSON object of the same shape
    Json,
}

impl SourceFormat {
    /// Infers the source format from file extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("js") => Some(Self::AmdModule),
            Some("json") => Some(Self::Json),
            _ => None,
        }
    }
}

/// Parses bundle source text into a value tree.
///
/// # Errors
/// Returns `SyntaxError` if the source is not a well-formed bundle module.
pub fn parse_bundle_source(source: &str, format: SourceFormat) -> Result<Value, SyntaxError> {
    match format {
        SourceFormat::AmdModule => parse_define_module(source),
        SourceFormat::Json => Ok(serde_json::from_str(source)?),
    }
}
