//! Query Planner subsystem for txledger
//!
//! The planner produces deterministic, immutable query plans.
//!
//! # Design Principles
//!
//! - Deterministic: same request → same plan
//! - Complete rejection: every invalid field is reported at once
//! - Descriptive only: plans are executed by a store adapter, never here
//!
//! # Plan shape
//!
//! 1. Key range: partition key equality AND sort key prefix
//! 2. Equality filters on origin, then operation type
//! 3. Exclusive start key decoded from the request cursor
//! 4. Page cap (request value or configured default)

mod expression;
mod planner;
mod request;

pub use expression::StoreExpression;
pub use planner::{
    FilterClause, KeyCondition, PlannerConfig, QueryPlan, QueryPlanner, DEFAULT_PAGE_SIZE,
};
pub use request::{parse_limit, ListRequest};
