//! Query planner
//!
//! Compiles a [`ListRequest`] into an immutable [`QueryPlan`]: a key-range
//! condition, equality filters applied after key matching, a resume
//! position, and a page cap. The planner never executes anything.

use crate::cursor::CursorCodec;
use crate::model::{Field, TransactionKey, ValidationError, ViolationReason};

use super::request::ListRequest;

/// Page cap used when a request does not carry one
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// "partition key equals X AND sort key begins with Y"
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyCondition {
    /// Exact partition key value
    pub user_id: String,
    /// Sort key prefix
    pub timestamp_prefix: String,
}

impl KeyCondition {
    /// Returns true if `key` lies inside the range
    pub fn matches(&self, key: &TransactionKey) -> bool {
        key.user_id == self.user_id && key.timestamp.starts_with(&self.timestamp_prefix)
    }

    /// Smallest key the range can contain
    pub fn lower_bound(&self) -> TransactionKey {
        TransactionKey::new(&self.user_id, &self.timestamp_prefix)
    }
}

/// Post-key-match equality predicate on a non-key field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterClause {
    /// Filtered field
    pub field: Field,
    /// Required value
    pub value: String,
}

impl FilterClause {
    /// Creates an equality clause
    pub fn eq(field: Field, value: impl Into<String>) -> Self {
        Self {
            field,
            value: value.into(),
        }
    }
}

/// Immutable query descriptor handed to a store adapter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryPlan {
    /// Key-range condition
    pub key_condition: KeyCondition,
    /// Equality filters, in the order origin, operation_type
    pub filters: Vec<FilterClause>,
    /// Resume after this key; empty means start of range
    pub exclusive_start_key: TransactionKey,
    /// Maximum number of key-matching rows to examine
    pub limit: u32,
}

/// Planner settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlannerConfig {
    /// Page cap used when a request does not carry one
    pub default_limit: u32,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Stateless planner
#[derive(Debug, Clone, Default)]
pub struct QueryPlanner {
    config: PlannerConfig,
}

impl QueryPlanner {
    /// Creates a planner
    pub fn new(config: PlannerConfig) -> Self {
        Self { config }
    }

    /// Returns the planner settings
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Plans a request.
    ///
    /// Deterministic: the same request always yields an equal plan. Every
    /// problem with the request is reported in one error.
    pub fn plan(&self, req: &ListRequest) -> Result<QueryPlan, ValidationError> {
        let mut errors = ValidationError::new();
        req.check_keys(&mut errors);

        let limit = match req.limit {
            None => self.config.default_limit,
            Some(n) => match u32::try_from(n) {
                Ok(n) if n > 0 => n,
                _ => {
                    errors.push("limit", ViolationReason::NotPositive);
                    0
                }
            },
        };

        let exclusive_start_key = match req.after.as_deref() {
            None | Some("") => TransactionKey::empty(),
            Some(token) => match CursorCodec::decode(token) {
                Ok(key) if is_foreign(&key, &req.user_id) => {
                    errors.push("after", ViolationReason::ForeignCursor);
                    TransactionKey::empty()
                }
                Ok(key) => key,
                Err(e) => {
                    errors.push("after", ViolationReason::InvalidCursor(e));
                    TransactionKey::empty()
                }
            },
        };

        let filters = [
            (Field::Origin, req.origin.as_deref()),
            (Field::OperationType, req.operation_type.as_deref()),
        ]
        .into_iter()
        .filter_map(|(field, value)| match value {
            Some(v) if !v.is_empty() => Some(FilterClause::eq(field, v)),
            _ => None,
        })
        .collect();

        errors.into_result(QueryPlan {
            key_condition: KeyCondition {
                user_id: req.user_id.clone(),
                timestamp_prefix: req.timestamp_prefix.clone(),
            },
            filters,
            exclusive_start_key,
            limit,
        })
    }
}

/// A resume position can only point into the requested partition
fn is_foreign(key: &TransactionKey, user_id: &str) -> bool {
    !key.is_empty() && !user_id.is_empty() && key.user_id != user_id
}
