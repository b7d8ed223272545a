//! Error types for the jobs feed client.

use thiserror::Error;

/// Result type for jobs client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Jobs client errors.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Configuration error (bad base URL, client construction failed)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network error (connection failed, timeout)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// API error (non-2xx response)
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Response body was not a valid jobs envelope
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ClientError {
    /// Whether the failure happened before any response was received.
    pub fn is_timeout(&self) -> bool {
        matches!(self, ClientError::Network(e) if e.is_timeout())
    }
}
