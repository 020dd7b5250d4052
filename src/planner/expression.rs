//! Store expression rendering
//!
//! Renders a plan into placeholder-based condition strings plus name and
//! value maps, the shape a key-value service's query call expects. Names
//! are `#0, #1, ...`, values are `:0, :1, ...`, numbered in render order.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::model::{AttributeValue, Field, RawRow};

use super::planner::QueryPlan;

/// Rendered query expression
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoreExpression {
    /// Key condition over the partition and sort keys
    pub key_condition: String,
    /// Filter over non-key fields, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    /// Placeholder → attribute name
    pub names: BTreeMap<String, String>,
    /// Placeholder → attribute value
    pub values: BTreeMap<String, AttributeValue>,
    /// Resume position, absent at the start of the range
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclusive_start_key: Option<RawRow>,
    /// Page cap
    pub limit: u32,
}

#[derive(Default)]
struct Placeholders {
    names: BTreeMap<String, String>,
    values: BTreeMap<String, AttributeValue>,
    next: usize,
}

impl Placeholders {
    fn bind(&mut self, field: Field, value: &str) -> (String, String) {
        let name = format!("#{}", self.next);
        let value_ref = format!(":{}", self.next);
        self.next += 1;
        self.names.insert(name.clone(), field.attribute().to_string());
        self.values
            .insert(value_ref.clone(), AttributeValue::string(value));
        (name, value_ref)
    }
}

impl QueryPlan {
    /// Renders the plan as a store expression
    pub fn expression(&self) -> StoreExpression {
        let mut ph = Placeholders::default();

        let (pk_name, pk_value) = ph.bind(Field::UserId, &self.key_condition.user_id);
        let (sk_name, sk_value) = ph.bind(Field::Timestamp, &self.key_condition.timestamp_prefix);
        let key_condition = format!(
            "({} = {}) AND (begins_with ({}, {}))",
            pk_name, pk_value, sk_name, sk_value
        );

        let clauses: Vec<String> = self
            .filters
            .iter()
            .map(|clause| {
                let (name, value) = ph.bind(clause.field, &clause.value);
                format!("{} = {}", name, value)
            })
            .collect();

        let filter = match clauses.len() {
            0 => None,
            1 => clauses.into_iter().next(),
            _ => Some(
                clauses
                    .iter()
                    .map(|c| format!("({})", c))
                    .collect::<Vec<_>>()
                    .join(" AND "),
            ),
        };

        StoreExpression {
            key_condition,
            filter,
            names: ph.names,
            values: ph.values,
            exclusive_start_key: self.exclusive_start_key.to_attributes(),
            limit: self.limit,
        }
    }
}

impl fmt::Display for StoreExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Key Condition: {}", self.key_condition)?;
        if let Some(filter) = &self.filter {
            writeln!(f, "Filter: {}", filter)?;
        }
        for (placeholder, name) in &self.names {
            writeln!(f, "  {} = {}", placeholder, name)?;
        }
        for (placeholder, value) in &self.values {
            match value.as_str() {
                Some(s) => writeln!(f, "  {} = {:?}", placeholder, s)?,
                None => writeln!(f, "  {} = {}", placeholder, value.kind())?,
            }
        }
        writeln!(f, "Limit: {}", self.limit)
    }
}
