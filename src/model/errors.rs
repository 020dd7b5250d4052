//! Error kinds shared by the planner, the codec, the assembler and the writer
//!
//! Error codes:
//! - TX_VALIDATION_FAILED (REJECT, 400)
//! - TX_DECODE_FAILED (REJECT, 400)

use std::fmt;

use thiserror::Error;

/// Why a single field was rejected
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ViolationReason {
    #[error("is required")]
    Required,

    #[error("must be >= 0")]
    Negative,

    #[error("must be a finite number")]
    NotFinite,

    #[error("must be a positive integer")]
    NotPositive,

    #[error("must be a decimal integer")]
    NotInteger,

    #[error("must be at most {max} bytes")]
    TooLong { max: usize },

    #[error("is not a valid cursor: {0}")]
    InvalidCursor(DecodeError),

    #[error("belongs to a different user")]
    ForeignCursor,
}

/// One rejected field
#[derive(Debug, Clone, PartialEq)]
pub struct FieldViolation {
    /// Logical field name
    pub field: &'static str,
    /// Rejection reason
    pub reason: ViolationReason,
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.reason)
    }
}

/// A request or record failed validation.
///
/// Always carries every offending field, never just the first one found.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ValidationError {
    violations: Vec<FieldViolation>,
}

impl ValidationError {
    /// Creates an empty collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an error holding a single violation
    pub fn single(field: &'static str, reason: ViolationReason) -> Self {
        let mut err = Self::new();
        err.push(field, reason);
        err
    }

    /// Records a violation
    pub fn push(&mut self, field: &'static str, reason: ViolationReason) {
        self.violations.push(FieldViolation { field, reason });
    }

    /// Returns true if nothing was recorded
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// All recorded violations in the order they were found
    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    /// Names of the rejected fields
    pub fn fields(&self) -> Vec<&'static str> {
        self.violations.iter().map(|v| v.field).collect()
    }

    /// Returns true if `field` was rejected
    pub fn has_field(&self, field: &str) -> bool {
        self.violations.iter().any(|v| v.field == field)
    }

    /// Converts the collector into a result: `Ok(value)` when empty
    pub fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }

    /// Stable error code
    pub fn code(&self) -> &'static str {
        "TX_VALIDATION_FAILED"
    }

    /// HTTP status mapping
    pub fn status_code(&self) -> u16 {
        400
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "validation failed: ")?;
        for (i, violation) in self.violations.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}", violation)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// A stored row (or position marker) could not be turned into a typed value
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowError {
    #[error("missing required field '{field}'")]
    Missing { field: &'static str },

    #[error("field '{field}' must be of type {expected}, found {found}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    #[error("field '{field}' holds a malformed number: '{value}'")]
    InvalidNumber { field: &'static str, value: String },
}

/// Decoding failures for cursors and store rows
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("cursor exceeds max length: {len} chars (max {max})")]
    CursorTooLong { len: usize, max: usize },

    #[error("cursor is not valid base64: {0}")]
    InvalidEncoding(String),

    #[error("cursor payload is malformed: {0}")]
    MalformedCursor(String),

    #[error("row {index}: {error}")]
    Row { index: usize, error: RowError },

    #[error("position marker: {0}")]
    Position(RowError),
}

impl DecodeError {
    /// Stable error code
    pub fn code(&self) -> &'static str {
        "TX_DECODE_FAILED"
    }

    /// HTTP status mapping
    pub fn status_code(&self) -> u16 {
        400
    }

    /// Index of the offending row, if a row failed
    pub fn row_index(&self) -> Option<usize> {
        match self {
            DecodeError::Row { index, .. } => Some(*index),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collector_lists_every_field() {
        let mut err = ValidationError::new();
        err.push("user_id", ViolationReason::Required);
        err.push("amount", ViolationReason::Negative);

        assert_eq!(err.fields(), vec!["user_id", "amount"]);
        assert_eq!(
            err.to_string(),
            "validation failed: user_id is required; amount must be >= 0"
        );
    }

    #[test]
    fn test_into_result() {
        assert_eq!(ValidationError::new().into_result(7), Ok(7));
        let err = ValidationError::single("limit", ViolationReason::NotPositive);
        assert!(err.into_result(()).is_err());
    }

    #[test]
    fn test_row_error_display_names_row() {
        let err = DecodeError::Row {
            index: 3,
            error: RowError::Missing { field: "amount" },
        };
        assert_eq!(err.to_string(), "row 3: missing required field 'amount'");
        assert_eq!(err.row_index(), Some(3));
        assert_eq!(err.code(), "TX_DECODE_FAILED");
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(ValidationError::new().status_code(), 400);
        assert_eq!(DecodeError::InvalidEncoding("x".into()).status_code(), 400);
    }
}
