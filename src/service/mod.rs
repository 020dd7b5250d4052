//! Service layer for txledger
//!
//! [`TransactionService`] composes the planner, the assembler and the key
//! assigner with a [`TransactionStore`](crate::store::TransactionStore).
//! Errors from every stage pass through unchanged.

mod config;
mod errors;
mod service;

pub use config::ServiceConfig;
pub use errors::{ConfigError, ServiceError, ServiceResult};
pub use service::TransactionService;
