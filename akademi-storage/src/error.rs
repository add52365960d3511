//! Error types for the storage layer.

use thiserror::Error;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur in storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// IO error (file system).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The backing store cannot be reached at all (no data directory,
    /// poisoned lock). Callers treat this as fatal to the one operation,
    /// never fatal to the application.
    #[error("profile storage unavailable: {0}")]
    Unavailable(String),
}
