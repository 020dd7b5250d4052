//! # Service Errors

use thiserror::Error;

use crate::model::{DecodeError, ValidationError};
use crate::store::StoreError;

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Errors surfaced by [`TransactionService`](super::TransactionService).
///
/// Messages pass through unchanged: callers show them verbatim.
#[derive(Debug, Clone, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ServiceError {
    /// Stable error code
    pub fn code(&self) -> &'static str {
        match self {
            ServiceError::Validation(e) => e.code(),
            ServiceError::Decode(e) => e.code(),
            ServiceError::Store(e) => e.code(),
        }
    }

    /// HTTP status mapping
    pub fn status_code(&self) -> u16 {
        match self {
            ServiceError::Validation(e) => e.status_code(),
            ServiceError::Decode(e) => e.status_code(),
            ServiceError::Store(e) => e.status_code(),
        }
    }
}

/// Configuration errors
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {reason}")]
    Read { path: String, reason: String },

    #[error("Invalid config JSON: {0}")]
    Parse(String),

    #[error("Invalid config: {0}")]
    Invalid(String),
}
