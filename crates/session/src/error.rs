//! Session error types.

use thiserror::Error;

/// Errors that can occur during session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Reading or writing the session keys failed.
    #[error("Session storage error: {0}")]
    Storage(#[from] local_storage::StorageError),

    /// Refused to store an empty user id.
    #[error("User id must not be empty")]
    EmptyUserId,
}

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;
