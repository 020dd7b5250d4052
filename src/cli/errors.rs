//! CLI-specific error types

use std::io;

use thiserror::Error;

use crate::service::{ConfigError, ServiceError};
use crate::store::StoreError;

/// CLI error
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Service(#[from] ServiceError),
}

impl CliError {
    /// Create an I/O error
    pub fn io_error(msg: impl Into<String>) -> Self {
        CliError::Io(msg.into())
    }

    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            CliError::Config(_) => "TX_CLI_CONFIG_ERROR",
            CliError::Io(_) => "TX_CLI_IO_ERROR",
            CliError::InvalidInput(_) => "TX_CLI_INVALID_INPUT",
            CliError::Store(e) => e.code(),
            CliError::Service(e) => e.code(),
        }
    }
}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        CliError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Io(format!("JSON error: {}", e))
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
