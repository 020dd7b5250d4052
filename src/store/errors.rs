//! # Store Errors

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Store adapter errors
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("I/O error on {path}: {reason}")]
    Io { path: String, reason: String },

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Row has no usable key: {0}")]
    InvalidRow(String),

    #[error("Store lock poisoned")]
    LockPoisoned,
}

impl StoreError {
    /// Stable error code
    pub fn code(&self) -> &'static str {
        "TX_STORE_FAILED"
    }

    /// HTTP status mapping
    pub fn status_code(&self) -> u16 {
        match self {
            StoreError::InvalidRow(_) => 400,
            _ => 500,
        }
    }

    pub(crate) fn io(path: &std::path::Path, err: std::io::Error) -> Self {
        StoreError::Io {
            path: path.display().to_string(),
            reason: err.to_string(),
        }
    }
}
