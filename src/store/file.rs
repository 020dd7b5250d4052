//! JSON-file-backed store
//!
//! Keeps the table in memory and rewrites the whole file on every
//! mutation. A change is applied to a staged copy, written to a sibling
//! temp file and renamed over the target; only then does it become
//! visible in memory. A failed write leaves both the file and the table
//! as they were.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::model::{RawRow, TransactionKey};
use crate::planner::QueryPlan;

use super::errors::{StoreError, StoreResult};
use super::memory::MemoryStore;
use super::{QueryOutput, TransactionStore};

/// File-backed table
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    inner: MemoryStore,
    // Serializes mutate-then-persist so snapshots land in order
    persist: Mutex<()>,
}

impl FileStore {
    /// Opens a table file, starting empty if it does not exist
    pub fn open(path: impl Into<PathBuf>, table: impl Into<String>) -> StoreResult<Self> {
        let path = path.into();
        let rows = if path.exists() {
            let content = fs::read_to_string(&path).map_err(|e| StoreError::io(&path, e))?;
            if content.trim().is_empty() {
                Vec::new()
            } else {
                serde_json::from_str::<Vec<RawRow>>(&content)
                    .map_err(|e| StoreError::Serialization(e.to_string()))?
            }
        } else {
            Vec::new()
        };

        Ok(Self {
            inner: MemoryStore::with_rows(table, rows)?,
            path,
            persist: Mutex::new(()),
        })
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn mutate<T>(&self, op: impl FnOnce(&MemoryStore) -> StoreResult<T>) -> StoreResult<T> {
        let _guard = self.persist.lock().map_err(|_| StoreError::LockPoisoned)?;
        let staged = self.inner.snapshot()?;
        let result = op(&staged)?;
        self.flush(&staged.scan()?)?;
        self.inner.commit(staged)?;
        Ok(result)
    }

    fn flush(&self, rows: &[RawRow]) -> StoreResult<()> {
        let content = serde_json::to_string_pretty(rows)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
        }

        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, content).map_err(|e| StoreError::io(&tmp, e))?;
        fs::rename(&tmp, &self.path).map_err(|e| StoreError::io(&self.path, e))
    }
}

impl TransactionStore for FileStore {
    fn table_name(&self) -> &str {
        self.inner.table_name()
    }

    fn query(&self, plan: &QueryPlan) -> StoreResult<QueryOutput> {
        self.inner.query(plan)
    }

    fn put(&self, row: RawRow) -> StoreResult<()> {
        self.mutate(|inner| inner.put(row))
    }

    fn delete(&self, key: &TransactionKey) -> StoreResult<bool> {
        self.mutate(|inner| inner.delete(key))
    }

    fn scan(&self) -> StoreResult<Vec<RawRow>> {
        self.inner.scan()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Transaction;
    use tempfile::TempDir;

    fn row(ts: &str) -> RawRow {
        Transaction::new("john", "web", "credit", 5.0)
            .with_timestamp(ts)
            .with_id("x")
            .to_attributes()
    }

    #[test]
    fn test_missing_file_starts_empty() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::open(dir.path().join("tx.json"), "Transactions").unwrap();
        assert!(store.scan().unwrap().is_empty());
        assert_eq!(store.table_name(), "Transactions");
    }

    #[test]
    fn test_rows_survive_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("tx.json");

        let store = FileStore::open(&path, "Transactions").unwrap();
        store.put(row("2021-01-01T00:00:00.000000Z")).unwrap();
        store.put(row("2021-01-02T00:00:00.000000Z")).unwrap();
        drop(store);

        let reopened = FileStore::open(&path, "Transactions").unwrap();
        assert_eq!(reopened.scan().unwrap().len(), 2);

        reopened
            .delete(&TransactionKey::new("john", "2021-01-01T00:00:00.000000Z"))
            .unwrap();
        drop(reopened);

        let again = FileStore::open(&path, "Transactions").unwrap();
        assert_eq!(again.scan().unwrap(), vec![row("2021-01-02T00:00:00.000000Z")]);
    }

    #[test]
    fn test_failed_put_leaves_no_trace() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();

        // The parent of the table file is a regular file, so every write fails
        let store = FileStore::open(blocker.join("tx.json"), "Transactions").unwrap();
        assert!(matches!(
            store.put(row("2021-01-01T00:00:00.000000Z")),
            Err(StoreError::Io { .. })
        ));
        assert!(store.scan().unwrap().is_empty());

        let plan = crate::planner::QueryPlanner::default()
            .plan(&crate::planner::ListRequest::new("john", "2021"))
            .unwrap();
        assert!(store.query(&plan).unwrap().items.is_empty());
    }

    #[test]
    fn test_failed_delete_keeps_row() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("nested");
        let path = nested.join("tx.json");

        let store = FileStore::open(&path, "Transactions").unwrap();
        store.put(row("2021-01-01T00:00:00.000000Z")).unwrap();

        fs::remove_dir_all(&nested).unwrap();
        fs::write(&nested, "").unwrap();

        let key = TransactionKey::new("john", "2021-01-01T00:00:00.000000Z");
        assert!(store.delete(&key).is_err());
        assert_eq!(store.scan().unwrap(), vec![row("2021-01-01T00:00:00.000000Z")]);

        // Once writes succeed again, the file reflects only committed changes
        fs::remove_file(&nested).unwrap();
        store.put(row("2021-01-02T00:00:00.000000Z")).unwrap();
        let reopened = FileStore::open(&path, "Transactions").unwrap();
        assert_eq!(reopened.scan().unwrap().len(), 2);
    }

    #[test]
    fn test_corrupt_file_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tx.json");
        fs::write(&path, "{not json").unwrap();
        assert!(matches!(
            FileStore::open(&path, "Transactions"),
            Err(StoreError::Serialization(_))
        ));
    }
}
