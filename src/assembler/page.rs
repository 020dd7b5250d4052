//! Response page types

use serde::{Deserialize, Serialize};

use crate::model::Transaction;

/// One page of a user's history
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListResponse {
    /// Records in sort-key order
    pub items: Vec<Transaction>,
    /// Continuation cursor; empty at the end of the range
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub cursor: String,
}

impl ListResponse {
    /// Returns true if another page may follow
    pub fn has_more(&self) -> bool {
        !self.cursor.is_empty()
    }

    /// Returns true if the page holds no records
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of records on the page
    pub fn len(&self) -> usize {
        self.items.len()
    }
}
