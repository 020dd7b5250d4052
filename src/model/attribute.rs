//! Tagged attribute values as the store sees them
//!
//! A store row is a map from store field name to a tagged value. Numbers
//! travel as decimal strings and are only parsed when a row is decoded.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A raw store row: store field name → tagged value
pub type RawRow = BTreeMap<String, AttributeValue>;

/// A single tagged store value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttributeValue {
    /// String value
    S(String),
    /// Number value, kept in its decimal text form
    N(String),
    /// Explicit null (treated the same as an absent attribute)
    #[serde(rename = "NULL")]
    Null,
}

impl AttributeValue {
    /// Creates a string value
    pub fn string(value: impl Into<String>) -> Self {
        AttributeValue::S(value.into())
    }

    /// Creates a number value from a float
    pub fn number(value: f64) -> Self {
        AttributeValue::N(value.to_string())
    }

    /// Returns the string payload, if this is a string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttributeValue::S(s) => Some(s),
            _ => None,
        }
    }

    /// Returns true for the null tag
    pub fn is_null(&self) -> bool {
        matches!(self, AttributeValue::Null)
    }

    /// Tag name as used in error messages
    pub fn kind(&self) -> &'static str {
        match self {
            AttributeValue::S(_) => "S",
            AttributeValue::N(_) => "N",
            AttributeValue::Null => "NULL",
        }
    }
}
