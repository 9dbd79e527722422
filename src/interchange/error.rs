//! Error types for interchange operations.

use thiserror::Error;

/// Errors that can occur while reading or writing interchange data.
#[derive(Debug, Error)]
pub enum InterchangeError {
    /// JSON parsing or serialization error.
    #[error("JSON error: {0}")]
    Json(String),

    /// IO error during read/write.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot written by an incompatible version.
    #[error("Unsupported snapshot version: {0}")]
    UnsupportedVersion(u32),

    /// Invalid value in otherwise well-formed data.
    #[error("Invalid {kind}: {message}")]
    Invalid { kind: &'static str, message: String },
}

impl InterchangeError {
    /// Create a JSON error.
    pub fn json(message: impl Into<String>) -> Self {
        Self::Json(message.into())
    }

    /// Create an invalid configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::Invalid {
            kind: "configuration",
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for InterchangeError {
    fn from(error: serde_json::Error) -> Self {
        Self::json(error.to_string())
    }
}
