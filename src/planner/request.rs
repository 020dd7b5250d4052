//! Logical list request
//!
//! A request names one user's partition and a sort-key prefix, plus optional
//! equality filters, a continuation cursor, and a page cap.

use std::collections::HashMap;

use crate::model::{ValidationError, ViolationReason, MAX_TIMESTAMP_LEN, MAX_USER_ID_LEN};

/// A logical "list transactions" request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListRequest {
    /// Partition key
    pub user_id: String,
    /// Sort key prefix, e.g. "2021-01" or "2021-01-01"
    pub timestamp_prefix: String,
    /// Equality filter on origin
    pub origin: Option<String>,
    /// Equality filter on operation type
    pub operation_type: Option<String>,
    /// Opaque cursor from a previous page
    pub after: Option<String>,
    /// Page cap
    pub limit: Option<i32>,
}

impl ListRequest {
    /// Creates a request for one user's sort-key prefix
    pub fn new(user_id: impl Into<String>, timestamp_prefix: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            timestamp_prefix: timestamp_prefix.into(),
            ..Default::default()
        }
    }

    /// Adds an origin filter
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    /// Adds an operation type filter
    pub fn with_operation_type(mut self, operation_type: impl Into<String>) -> Self {
        self.operation_type = Some(operation_type.into());
        self
    }

    /// Resumes after a cursor
    pub fn with_after(mut self, after: impl Into<String>) -> Self {
        self.after = Some(after.into());
        self
    }

    /// Caps the page size
    pub fn with_limit(mut self, limit: i32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Builds a request from path and query-string parameters.
    ///
    /// Path: `user_id`, `ts`. Query: `origin`, `operation_type`, `after`,
    /// `limit`. Empty values count as absent. An unparsable limit is
    /// reported together with any key violations.
    pub fn from_parameters(
        path: &HashMap<String, String>,
        query: &HashMap<String, String>,
    ) -> Result<Self, ValidationError> {
        let mut req = Self {
            user_id: path.get("user_id").cloned().unwrap_or_default(),
            timestamp_prefix: path.get("ts").cloned().unwrap_or_default(),
            origin: non_empty(query.get("origin")),
            operation_type: non_empty(query.get("operation_type")),
            after: non_empty(query.get("after")),
            limit: None,
        };

        match parse_limit(query.get("limit").map(String::as_str)) {
            Ok(limit) => {
                req.limit = limit;
                Ok(req)
            }
            Err(limit_error) => {
                let mut errors = ValidationError::new();
                req.check_keys(&mut errors);
                for violation in limit_error.violations() {
                    errors.push(violation.field, violation.reason.clone());
                }
                Err(errors)
            }
        }
    }

    /// Records violations of the partition key and sort-key prefix
    pub(crate) fn check_keys(&self, errors: &mut ValidationError) {
        check_key_field(errors, "user_id", &self.user_id, MAX_USER_ID_LEN);
        check_key_field(errors, "timestamp_prefix", &self.timestamp_prefix, MAX_TIMESTAMP_LEN);
    }
}

fn check_key_field(errors: &mut ValidationError, field: &'static str, value: &str, max: usize) {
    if value.is_empty() {
        errors.push(field, ViolationReason::Required);
    } else if value.len() > max {
        errors.push(field, ViolationReason::TooLong { max });
    }
}

fn non_empty(value: Option<&String>) -> Option<String> {
    value.filter(|v| !v.is_empty()).cloned()
}

/// Parses a decimal page cap. Empty or missing text means no cap.
pub fn parse_limit(text: Option<&str>) -> Result<Option<i32>, ValidationError> {
    match text {
        None | Some("") => Ok(None),
        Some(text) => text
            .parse::<i32>()
            .map(Some)
            .map_err(|_| ValidationError::single("limit", ViolationReason::NotInteger)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_parse_limit() {
        assert_eq!(parse_limit(None), Ok(None));
        assert_eq!(parse_limit(Some("")), Ok(None));
        assert_eq!(parse_limit(Some("123")), Ok(Some(123)));
        assert_eq!(parse_limit(Some("-456")), Ok(Some(-456)));
        assert_eq!(parse_limit(Some("0")), Ok(Some(0)));

        let err = parse_limit(Some("abc")).unwrap_err();
        assert_eq!(err.fields(), vec!["limit"]);
        assert_eq!(err.to_string(), "validation failed: limit must be a decimal integer");

        assert!(parse_limit(Some("99999999999")).is_err());
    }

    #[test]
    fn test_from_parameters() {
        let path = params(&[("user_id", "john"), ("ts", "2021-01")]);
        let query = params(&[("origin", "web"), ("operation_type", ""), ("limit", "5")]);

        let req = ListRequest::from_parameters(&path, &query).unwrap();
        assert_eq!(
            req,
            ListRequest::new("john", "2021-01").with_origin("web").with_limit(5)
        );
    }

    #[test]
    fn test_from_parameters_missing_path() {
        let req = ListRequest::from_parameters(&HashMap::new(), &HashMap::new()).unwrap();
        assert!(req.user_id.is_empty());
        assert!(req.timestamp_prefix.is_empty());
        assert_eq!(req.limit, None);
    }

    #[test]
    fn test_from_parameters_bad_limit() {
        let path = params(&[("user_id", "john"), ("ts", "2021")]);
        let query = params(&[("limit", "ten")]);
        let err = ListRequest::from_parameters(&path, &query).unwrap_err();
        assert_eq!(err.fields(), vec!["limit"]);
    }

    #[test]
    fn test_bad_limit_reported_with_missing_keys() {
        let query = params(&[("limit", "ten")]);
        let err = ListRequest::from_parameters(&HashMap::new(), &query).unwrap_err();
        assert_eq!(err.fields(), vec!["user_id", "timestamp_prefix", "limit"]);
        assert_eq!(err.violations()[2].reason, ViolationReason::NotInteger);
    }

    #[test]
    fn test_oversized_keys_flagged() {
        let req = ListRequest::new("u".repeat(MAX_USER_ID_LEN + 1), "t".repeat(MAX_TIMESTAMP_LEN));
        let mut errors = ValidationError::new();
        req.check_keys(&mut errors);
        assert_eq!(errors.fields(), vec!["user_id"]);
        assert_eq!(
            errors.violations()[0].reason,
            ViolationReason::TooLong { max: MAX_USER_ID_LEN }
        );
    }
}
