//! Transaction service
//!
//! Wires the pure pipeline to a store:
//!
//! - list: plan → store query → marker → assemble
//! - create: assign keys and validate → store put
//!
//! The store is an explicit dependency; there is no process-wide handle.

use crate::assembler::{ListResponse, ResultAssembler};
use crate::model::{DecodeError, Transaction, TransactionKey};
use crate::observability::Logger;
use crate::planner::{ListRequest, QueryPlanner, StoreExpression};
use crate::store::TransactionStore;
use crate::writer::KeyAssigner;

use super::config::ServiceConfig;
use super::errors::ServiceResult;

/// Creates and lists transactions against one store
pub struct TransactionService<S: TransactionStore> {
    store: S,
    planner: QueryPlanner,
    assigner: KeyAssigner,
}

impl<S: TransactionStore> TransactionService<S> {
    /// Creates a service over `store`
    pub fn new(store: S, config: &ServiceConfig) -> Self {
        Self {
            store,
            planner: QueryPlanner::new(config.planner_config()),
            assigner: KeyAssigner::new(),
        }
    }

    /// The underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Completes, validates and persists a new record
    pub fn create(&self, input: Transaction) -> ServiceResult<Transaction> {
        let record = self.assigner.prepare(input)?;
        self.store.put(record.to_attributes())?;

        Logger::info(
            "TRANSACTION_CREATED",
            &[
                ("table", self.store.table_name()),
                ("user_id", record.user_id.as_str()),
                ("ts", record.timestamp.as_str()),
                ("tr_id", record.id.as_str()),
            ],
        );
        Ok(record)
    }

    /// Lists one page of a user's history
    pub fn list(&self, req: &ListRequest) -> ServiceResult<ListResponse> {
        let plan = self.planner.plan(req)?;
        let output = self.store.query(&plan)?;

        let position = TransactionKey::from_attributes(output.last_evaluated_key.as_ref())
            .map_err(DecodeError::Position)?;
        let page = ResultAssembler::assemble(&output.items, &position)?;

        let items = page.len().to_string();
        Logger::info(
            "LIST_PAGE",
            &[
                ("table", self.store.table_name()),
                ("user_id", req.user_id.as_str()),
                ("ts_prefix", req.timestamp_prefix.as_str()),
                ("items", items.as_str()),
                ("has_more", if page.has_more() { "true" } else { "false" }),
            ],
        );
        Ok(page)
    }

    /// Renders the store expression a list request would run
    pub fn explain(&self, req: &ListRequest) -> ServiceResult<StoreExpression> {
        Ok(self.planner.plan(req)?.expression())
    }

    /// Reads every record across all partitions
    pub fn scan(&self) -> ServiceResult<Vec<Transaction>> {
        let rows = self.store.scan()?;
        Ok(ResultAssembler::decode_rows(&rows)?)
    }

    /// Deletes one record; returns whether it existed
    pub fn delete(&self, key: &TransactionKey) -> ServiceResult<bool> {
        let removed = self.store.delete(key)?;
        Logger::info(
            "TRANSACTION_DELETED",
            &[
                ("table", self.store.table_name()),
                ("user_id", key.user_id.as_str()),
                ("ts", key.timestamp.as_str()),
                ("removed", if removed { "true" } else { "false" }),
            ],
        );
        Ok(removed)
    }

    /// Deletes every record; returns how many were removed
    pub fn delete_all(&self) -> ServiceResult<usize> {
        let mut removed = 0;
        for row in self.store.scan()? {
            let key = TransactionKey::from_attributes(Some(&row)).map_err(DecodeError::Position)?;
            if self.store.delete(&key)? {
                removed += 1;
            }
        }

        let count = removed.to_string();
        Logger::info(
            "STORE_PURGED",
            &[("table", self.store.table_name()), ("removed", count.as_str())],
        );
        Ok(removed)
    }
}
