//! Transaction entity, its composite key, and the field mapping table
//!
//! The mapping between logical field names and store/wire attribute names is
//! kept in one place ([`Field`]) and every conversion goes through it.

use serde::{Deserialize, Serialize};

use super::attribute::{AttributeValue, RawRow};
use super::errors::RowError;

/// Every field of a transaction record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    UserId,
    Timestamp,
    Id,
    Origin,
    OperationType,
    Amount,
}

impl Field {
    /// All fields in record order
    pub const ALL: [Field; 6] = [
        Field::UserId,
        Field::Timestamp,
        Field::Id,
        Field::Origin,
        Field::OperationType,
        Field::Amount,
    ];

    /// Logical name, used in validation messages
    pub fn name(&self) -> &'static str {
        match self {
            Field::UserId => "user_id",
            Field::Timestamp => "timestamp",
            Field::Id => "id",
            Field::Origin => "origin",
            Field::OperationType => "operation_type",
            Field::Amount => "amount",
        }
    }

    /// Store attribute name (also the JSON name)
    pub fn attribute(&self) -> &'static str {
        match self {
            Field::UserId => "user_id",
            Field::Timestamp => "ts",
            Field::Id => "tr_id",
            Field::Origin => "origin",
            Field::OperationType => "operation_type",
            Field::Amount => "amount",
        }
    }

    /// Looks a field up by its store attribute name
    pub fn from_attribute(attribute: &str) -> Option<Field> {
        Field::ALL.into_iter().find(|f| f.attribute() == attribute)
    }
}

/// Longest accepted partition key, in bytes
pub const MAX_USER_ID_LEN: usize = 2048;

/// Longest accepted sort key or sort-key prefix, in bytes
pub const MAX_TIMESTAMP_LEN: usize = 1024;

/// Composite primary key: partition key `user_id`, sort key `timestamp`.
///
/// The empty key means "no position".
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TransactionKey {
    pub user_id: String,
    #[serde(rename = "ts")]
    pub timestamp: String,
}

impl TransactionKey {
    /// Creates a key
    pub fn new(user_id: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            timestamp: timestamp.into(),
        }
    }

    /// The "no position" sentinel
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns true for the sentinel
    pub fn is_empty(&self) -> bool {
        self.user_id.is_empty() && self.timestamp.is_empty()
    }

    /// Returns true when both fields fit the key length limits
    pub fn within_limits(&self) -> bool {
        self.user_id.len() <= MAX_USER_ID_LEN && self.timestamp.len() <= MAX_TIMESTAMP_LEN
    }

    /// Reads a store position marker. `None` maps to the empty key.
    pub fn from_attributes(attrs: Option<&RawRow>) -> Result<Self, RowError> {
        let Some(attrs) = attrs else {
            return Ok(Self::empty());
        };
        Ok(Self {
            user_id: read_string(attrs, Field::UserId)?,
            timestamp: read_string(attrs, Field::Timestamp)?,
        })
    }

    /// Writes the key as a store position marker. The empty key has none.
    pub fn to_attributes(&self) -> Option<RawRow> {
        if self.is_empty() {
            return None;
        }
        let mut attrs = RawRow::new();
        attrs.insert(
            Field::UserId.attribute().to_string(),
            AttributeValue::string(&self.user_id),
        );
        attrs.insert(
            Field::Timestamp.attribute().to_string(),
            AttributeValue::string(&self.timestamp),
        );
        Some(attrs)
    }
}

/// An immutable transaction event
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Transaction {
    pub user_id: String,
    #[serde(rename = "ts")]
    pub timestamp: String,
    #[serde(rename = "tr_id")]
    pub id: String,
    pub origin: String,
    pub operation_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
}

impl Transaction {
    /// Creates a transaction without identity or time fields
    pub fn new(
        user_id: impl Into<String>,
        origin: impl Into<String>,
        operation_type: impl Into<String>,
        amount: f64,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            origin: origin.into(),
            operation_type: operation_type.into(),
            amount: Some(amount),
            ..Default::default()
        }
    }

    /// Sets the sort key
    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = timestamp.into();
        self
    }

    /// Sets the identifier
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// The composite primary key of this record
    pub fn key(&self) -> TransactionKey {
        TransactionKey::new(&self.user_id, &self.timestamp)
    }

    /// Converts the record into a store row
    pub fn to_attributes(&self) -> RawRow {
        let mut row = RawRow::new();
        for field in Field::ALL {
            let value = match field {
                Field::UserId => AttributeValue::string(&self.user_id),
                Field::Timestamp => AttributeValue::string(&self.timestamp),
                Field::Id => AttributeValue::string(&self.id),
                Field::Origin => AttributeValue::string(&self.origin),
                Field::OperationType => AttributeValue::string(&self.operation_type),
                Field::Amount => match self.amount {
                    Some(amount) => AttributeValue::number(amount),
                    None => AttributeValue::Null,
                },
            };
            row.insert(field.attribute().to_string(), value);
        }
        row
    }

    /// Decodes a store row. Every field is required.
    pub fn from_attributes(row: &RawRow) -> Result<Self, RowError> {
        Ok(Self {
            user_id: read_string(row, Field::UserId)?,
            timestamp: read_string(row, Field::Timestamp)?,
            id: read_string(row, Field::Id)?,
            origin: read_string(row, Field::Origin)?,
            operation_type: read_string(row, Field::OperationType)?,
            amount: Some(read_number(row, Field::Amount)?),
        })
    }
}

fn lookup(row: &RawRow, field: Field) -> Result<&AttributeValue, RowError> {
    match row.get(field.attribute()) {
        Some(value) if !value.is_null() => Ok(value),
        _ => Err(RowError::Missing {
            field: field.attribute(),
        }),
    }
}

fn read_string(row: &RawRow, field: Field) -> Result<String, RowError> {
    match lookup(row, field)? {
        AttributeValue::S(s) => Ok(s.clone()),
        other => Err(RowError::WrongType {
            field: field.attribute(),
            expected: "S",
            found: other.kind(),
        }),
    }
}

fn read_number(row: &RawRow, field: Field) -> Result<f64, RowError> {
    match lookup(row, field)? {
        AttributeValue::N(text) => match text.trim().parse::<f64>() {
            Ok(n) if n.is_finite() => Ok(n),
            _ => Err(RowError::InvalidNumber {
                field: field.attribute(),
                value: text.clone(),
            }),
        },
        other => Err(RowError::WrongType {
            field: field.attribute(),
            expected: "N",
            found: other.kind(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Transaction {
        Transaction::new("john", "web", "credit", 10.0)
            .with_timestamp("2021-01-01T00:00:00.000000Z")
            .with_id("a1")
    }

    #[test]
    fn test_field_table() {
        assert_eq!(Field::Timestamp.attribute(), "ts");
        assert_eq!(Field::Id.attribute(), "tr_id");
        assert_eq!(Field::from_attribute("ts"), Some(Field::Timestamp));
        assert_eq!(Field::from_attribute("timestamp"), None);
        for field in Field::ALL {
            assert_eq!(Field::from_attribute(field.attribute()), Some(field));
        }
    }

    #[test]
    fn test_row_conversion() {
        let tr = sample();
        let row = tr.to_attributes();
        assert_eq!(row.get("ts"), Some(&AttributeValue::string("2021-01-01T00:00:00.000000Z")));
        assert_eq!(row.get("amount"), Some(&AttributeValue::N("10".into())));
        assert_eq!(Transaction::from_attributes(&row).unwrap(), tr);
    }

    #[test]
    fn test_decode_missing_field() {
        let mut row = sample().to_attributes();
        row.remove("origin");
        assert_eq!(
            Transaction::from_attributes(&row),
            Err(RowError::Missing { field: "origin" })
        );
    }

    #[test]
    fn test_decode_null_is_missing() {
        let mut row = sample().to_attributes();
        row.insert("amount".into(), AttributeValue::Null);
        assert_eq!(
            Transaction::from_attributes(&row),
            Err(RowError::Missing { field: "amount" })
        );
    }

    #[test]
    fn test_decode_wrong_tag() {
        let mut row = sample().to_attributes();
        row.insert("amount".into(), AttributeValue::string("10"));
        assert!(matches!(
            Transaction::from_attributes(&row),
            Err(RowError::WrongType { field: "amount", expected: "N", found: "S" })
        ));
    }

    #[test]
    fn test_decode_malformed_number() {
        let mut row = sample().to_attributes();
        row.insert("amount".into(), AttributeValue::N("ten".into()));
        assert!(matches!(
            Transaction::from_attributes(&row),
            Err(RowError::InvalidNumber { field: "amount", .. })
        ));
    }

    #[test]
    fn test_key_markers() {
        assert_eq!(TransactionKey::empty().to_attributes(), None);
        assert_eq!(TransactionKey::from_attributes(None), Ok(TransactionKey::empty()));

        let key = sample().key();
        let attrs = key.to_attributes().unwrap();
        assert_eq!(attrs.len(), 2);
        assert_eq!(TransactionKey::from_attributes(Some(&attrs)), Ok(key));
    }

    #[test]
    fn test_json_names() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["ts"], "2021-01-01T00:00:00.000000Z");
        assert_eq!(json["tr_id"], "a1");
        assert_eq!(json["amount"], 10.0);

        let parsed: Transaction = serde_json::from_str(r#"{"user_id":"john"}"#).unwrap();
        assert_eq!(parsed.user_id, "john");
        assert_eq!(parsed.amount, None);
    }

    #[test]
    fn test_key_ordering_follows_sort_key() {
        let a = TransactionKey::new("john", "2021-01-01T00:00:00.000000Z");
        let b = TransactionKey::new("john", "2021-01-02T00:00:00.000000Z");
        assert!(a < b);
    }
}
