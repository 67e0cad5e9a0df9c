//! Serializer error types.

use thiserror::Error;

/// Errors that can occur while writing or reading a configuration document.
#[derive(Debug, Error)]
pub enum EmitError {
    /// The XML writer or reader failed.
    #[error("XML error: {0}")]
    Xml(String),

    /// JSON encoding or decoding failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The document is well-formed but not a configuration document.
    #[error("malformed document: {0}")]
    Malformed(String),

    /// JSON has no representation for infinities or NaN.
    #[error("constant '{name}' holds a non-finite number, which JSON cannot represent")]
    NonFinite { name: String },

    /// The writer produced bytes that are not UTF-8.
    #[error("output is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Serializer result type alias.
pub type EmitResult<T> = Result<T, EmitError>;
