//! Error types for the auth module.

use akademi_license::InvalidCode;
use akademi_storage::StorageError;
use thiserror::Error;

/// Result type for auth operations.
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific errors.
///
/// None of these reach the end user as-is; the facade converts every
/// failure into a status message and keeps the surrounding page usable.
#[derive(Debug, Error)]
pub enum AuthError {
    /// User input does not match the code grammar.
    #[error("invalid code format")]
    InvalidFormat(#[from] InvalidCode),

    /// The code is already bound to a different device.
    #[error("code already in use on another device")]
    DeviceConflict,

    /// The profile store failed underneath an operation.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Session record serialization failed.
    #[error("session serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The redemption backend rejected or failed the request.
    #[error("backend error: {0}")]
    Backend(String),
}
