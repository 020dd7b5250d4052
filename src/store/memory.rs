//! In-memory reference store
//!
//! Executes query plans the way a partitioned key-value store does:
//!
//! 1. Seek to the partition and sort-key prefix (or just past the start key)
//! 2. Walk key-matching rows in ascending sort-key order
//! 3. Stop after `limit` rows have been examined
//! 4. Drop examined rows that fail a filter clause
//! 5. Report the last examined key if key-matching rows remain

use std::collections::BTreeMap;
use std::ops::Bound;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::model::{RawRow, TransactionKey};
use crate::planner::{FilterClause, QueryPlan};

use super::errors::{StoreError, StoreResult};
use super::{QueryOutput, TransactionStore};

/// Thread-safe in-memory table
#[derive(Debug)]
pub struct MemoryStore {
    table: String,
    rows: RwLock<BTreeMap<TransactionKey, RawRow>>,
}

impl MemoryStore {
    /// Creates an empty table
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            rows: RwLock::new(BTreeMap::new()),
        }
    }

    /// Creates a table pre-loaded with rows
    pub fn with_rows(table: impl Into<String>, rows: Vec<RawRow>) -> StoreResult<Self> {
        let store = Self::new(table);
        {
            let mut map = store.write()?;
            for row in rows {
                let key = row_key(&row)?;
                map.insert(key, row);
            }
        }
        Ok(store)
    }

    /// Number of stored rows
    pub fn len(&self) -> StoreResult<usize> {
        Ok(self.read()?.len())
    }

    /// Returns true when the table is empty
    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.read()?.is_empty())
    }

    /// Copies the table so a change can be staged off to the side
    pub(crate) fn snapshot(&self) -> StoreResult<Self> {
        Ok(Self {
            table: self.table.clone(),
            rows: RwLock::new(self.read()?.clone()),
        })
    }

    /// Replaces the contents with those of a staged snapshot
    pub(crate) fn commit(&self, staged: Self) -> StoreResult<()> {
        let rows = staged.rows.into_inner().map_err(|_| StoreError::LockPoisoned)?;
        *self.write()? = rows;
        Ok(())
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, BTreeMap<TransactionKey, RawRow>>> {
        self.rows.read().map_err(|_| StoreError::LockPoisoned)
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, BTreeMap<TransactionKey, RawRow>>> {
        self.rows.write().map_err(|_| StoreError::LockPoisoned)
    }
}

impl TransactionStore for MemoryStore {
    fn table_name(&self) -> &str {
        &self.table
    }

    fn query(&self, plan: &QueryPlan) -> StoreResult<QueryOutput> {
        let rows = self.read()?;
        let cond = &plan.key_condition;
        let lower = cond.lower_bound();
        let start = &plan.exclusive_start_key;

        let from = if !start.is_empty() && *start >= lower {
            Bound::Excluded(start)
        } else {
            Bound::Included(&lower)
        };

        let limit = usize::try_from(plan.limit.max(1)).unwrap_or(usize::MAX);
        let mut matching = rows
            .range::<TransactionKey, _>((from, Bound::Unbounded))
            .take_while(|(key, _)| cond.matches(key));

        let mut items = Vec::new();
        let mut examined = 0;
        let mut last_key = None;

        for (key, row) in matching.by_ref() {
            examined += 1;
            last_key = Some(key);
            if matches_filters(row, &plan.filters) {
                items.push(row.clone());
            }
            if examined == limit {
                break;
            }
        }

        let truncated = examined == limit && matching.next().is_some();
        let last_evaluated_key = if truncated {
            last_key.and_then(TransactionKey::to_attributes)
        } else {
            None
        };

        Ok(QueryOutput {
            items,
            last_evaluated_key,
        })
    }

    fn put(&self, row: RawRow) -> StoreResult<()> {
        let key = row_key(&row)?;
        // Same key overwrites, matching the store contract
        self.write()?.insert(key, row);
        Ok(())
    }

    fn delete(&self, key: &TransactionKey) -> StoreResult<bool> {
        Ok(self.write()?.remove(key).is_some())
    }

    fn scan(&self) -> StoreResult<Vec<RawRow>> {
        Ok(self.read()?.values().cloned().collect())
    }
}

/// Extracts the composite key of a row
pub(crate) fn row_key(row: &RawRow) -> StoreResult<TransactionKey> {
    let key = TransactionKey::from_attributes(Some(row))
        .map_err(|e| StoreError::InvalidRow(e.to_string()))?;
    if key.user_id.is_empty() || key.timestamp.is_empty() {
        return Err(StoreError::InvalidRow("empty key attribute".to_string()));
    }
    if !key.within_limits() {
        return Err(StoreError::InvalidRow("key attribute too long".to_string()));
    }
    Ok(key)
}

/// All clauses must match (AND semantics); missing or non-string
/// attributes never match
fn matches_filters(row: &RawRow, filters: &[FilterClause]) -> bool {
    filters.iter().all(|clause| {
        row.get(clause.field.attribute())
            .and_then(|value| value.as_str())
            .is_some_and(|value| value == clause.value)
    })
}
