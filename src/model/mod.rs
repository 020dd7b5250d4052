//! Data model for txledger
//!
//! Transactions are immutable events keyed by `(user_id, timestamp)`. Store
//! rows are typed attribute maps, and the conversion between the two is an
//! explicit function driven by the [`Field`] table.

mod attribute;
mod errors;
mod timestamp;
mod transaction;

pub use attribute::{AttributeValue, RawRow};
pub use errors::{DecodeError, FieldViolation, RowError, ValidationError, ViolationReason};
pub use timestamp::{format_timestamp, parse_timestamp, MonotonicClock, TIMESTAMP_FORMAT};
pub use transaction::{
    Field, Transaction, TransactionKey, MAX_TIMESTAMP_LEN, MAX_USER_ID_LEN,
};
