//! Error types for dvc-console
//!
//! The public normalizers never surface these: they absorb them and degrade
//! to empty output. The fallible entry points (`try_normalize`, config
//! loading) return them for callers that want to know what went wrong.

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// dvc-console error types
#[derive(Error, Debug)]
pub enum Error {
    /// Payload (or config) text is not valid JSON
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Top-level payload has the wrong JSON type
    #[error("Unexpected payload shape: expected {expected}, found {found}")]
    UnexpectedShape {
        /// JSON type the normalizer accepts
        expected: &'static str,
        /// JSON type that was received
        found: &'static str,
    },

    /// Invalid normalizer configuration
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Name of a JSON value's type, for error messages and logs.
#[must_use]
pub const fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
