//! Observability subsystem for txledger
//!
//! Structured JSON logging only. Logging is read-only: it never changes
//! the result of the operation it describes.
//!
//! ```ignore
//! use txledger::observability::Logger;
//!
//! Logger::info("LIST_PAGE", &[("user_id", "john"), ("items", "2")]);
//! ```

mod logger;

pub use logger::{Logger, Severity};
