//! Typed errors for the sync core.
//!
//! Remote failures and local failures are kept apart: a `SourceError` is an
//! expected, recoverable outcome of a pagination step, while a `SyncError`
//! means the local store itself misbehaved.

use thiserror::Error;

use crate::types::record::JobId;

/// Errors raised by the core.
///
/// Remote failures never appear here; pagination reports them through
/// `LoadOutcome::Failed`.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Storage operation failed
    #[error("storage error: {0}")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// `update_one` targeted a row that does not exist
    #[error("job not found: {id}")]
    JobNotFound { id: JobId },

    /// Persisted row could not be decoded
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Configuration error
    #[error("config error: {0}")]
    Config(String),
}

/// Errors returned by a `RemoteSource`.
///
/// A well-formed empty page is never an error.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Transport failed before a response arrived
    #[error("network error: {0}")]
    Network(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Request timed out
    #[error("timeout fetching page {page}")]
    Timeout { page: u32 },

    /// Remote answered with a non-success status
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Response could not be decoded
    #[error("protocol error: {0}")]
    Protocol(String),
}

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, SyncError>;

/// Result type alias for remote fetches.
pub type SourceResult<T> = std::result::Result<T, SourceError>;
