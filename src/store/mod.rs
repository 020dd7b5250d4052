//! Store adapters
//!
//! The core never talks to a store directly. A [`TransactionStore`] takes a
//! [`QueryPlan`] and returns raw rows plus the native resume marker; the
//! service turns that marker into a [`TransactionKey`].
//!
//! # Contract
//!
//! - `query`: key-matching rows in ascending sort-key order, strictly after
//!   the plan's start key, at most `limit` rows examined, filters applied to
//!   examined rows
//! - `put`: an existing `(user_id, timestamp)` is silently overwritten
//! - `delete`: reports whether a row was removed
//!
//! [`TransactionKey`]: crate::model::TransactionKey

mod errors;
mod file;
mod memory;

pub use errors::{StoreError, StoreResult};
pub use file::FileStore;
pub use memory::MemoryStore;

use crate::model::{RawRow, TransactionKey};
use crate::planner::QueryPlan;

/// Raw output of one query call
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryOutput {
    /// Matched rows in store order
    pub items: Vec<RawRow>,
    /// Key of the last examined row when the page was truncated
    pub last_evaluated_key: Option<RawRow>,
}

/// A partitioned key-value table of transaction rows
pub trait TransactionStore: Send + Sync {
    /// Name of the backing table
    fn table_name(&self) -> &str;

    /// Executes a range query
    fn query(&self, plan: &QueryPlan) -> StoreResult<QueryOutput>;

    /// Inserts a row, overwriting any row with the same key
    fn put(&self, row: RawRow) -> StoreResult<()>;

    /// Deletes a row by key
    fn delete(&self, key: &TransactionKey) -> StoreResult<bool>;

    /// Reads every row across all partitions
    fn scan(&self) -> StoreResult<Vec<RawRow>>;
}
