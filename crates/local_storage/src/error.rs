//! Local storage error types

use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StorageError {
    /// Key cannot be mapped to a storage slot
    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    /// Underlying I/O failure
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored value is not valid UTF-8
    #[error("Stored value for {0} is not valid UTF-8")]
    InvalidEncoding(String),

    /// Lock poisoned by a panicking writer
    #[error("Storage lock poisoned: {0}")]
    Poisoned(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;
