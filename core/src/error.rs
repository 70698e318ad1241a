//! Error types for builtin extraction.
//!
//! Covers the fatal paths only: reading the source document or a config
//! file, (de)serializing configuration and output, and invalid settings.
//! An allow-listed table without any signatures is not an error.

use thiserror::Error;

/// Errors that can occur while extracting or emitting builtin tables.
#[derive(Debug, Error)]
pub enum BuiltinError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing or serialization failure.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON serialization failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration failed validation.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

/// Convenience alias for results with [`BuiltinError`].
pub type Result<T> = std::result::Result<T, BuiltinError>;
