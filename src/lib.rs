//! txledger - an immutable transaction ledger with cursor pagination
//!
//! Records are partitioned by user and sorted by a UTC microsecond
//! timestamp. A list call is a pure pipeline:
//!
//! - [`planner`] turns a request into a key-condition query plan
//! - [`store`] runs the plan and reports where it stopped
//! - [`assembler`] decodes rows and encodes the next-page [`cursor`]
//!
//! Writes go through [`writer`], which assigns identity and time and
//! validates before anything reaches the store.

pub mod assembler;
pub mod cli;
pub mod cursor;
pub mod model;
pub mod observability;
pub mod planner;
pub mod service;
pub mod store;
pub mod writer;
