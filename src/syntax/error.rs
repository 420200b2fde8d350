use thiserror::Error;

/// Errors raised while reading a bundle source into a value tree
#[derive(Error, Debug)]
pub enum SyntaxError {
    /// Error when failing to set the language for the parser
    #[error("Failed to set language for parser: {0}")]
    LanguageSetup(#[from] tree_sitter::LanguageError),
    /// Error when the parser gives up on the source
    #[error("Failed to parse source code")]
    ParseFailed,
    /// The source contains a JavaScript syntax error
    #[error("Syntax error at line {line}, column {column}")]
    Malformed { line: usize, column: usize },
    /// No top-level `define(...)` call with an object literal argument
    #[error("No define(...) call with an object literal found")]
    MissingDefine,
    /// A construct that cannot appear in a static message bundle
    #[error("Unsupported {what} '{text}' at line {line}")]
    Unsupported { what: &'static str, text: String, line: usize },
    /// Error when a JSON bundle cannot be parsed
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}
