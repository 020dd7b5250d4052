//! Identity and time assignment for new records

use uuid::Uuid;

use crate::model::{
    Field, MonotonicClock, Transaction, ValidationError, ViolationReason, MAX_TIMESTAMP_LEN,
    MAX_USER_ID_LEN,
};

/// Fills `id` and `timestamp` on new records and validates them.
///
/// Timestamps issued by one assigner strictly increase, so a single
/// writer's records keep their write order. Share one assigner per process.
#[derive(Debug, Default)]
pub struct KeyAssigner {
    clock: MonotonicClock,
}

impl KeyAssigner {
    /// Creates an assigner
    pub fn new() -> Self {
        Self::default()
    }

    /// Completes and validates a record.
    ///
    /// Missing `id` gets a random UUID, missing `timestamp` gets the current
    /// sort key. Provided values are kept as-is.
    pub fn prepare(&self, mut input: Transaction) -> Result<Transaction, ValidationError> {
        if input.id.is_empty() {
            input.id = Uuid::new_v4().to_string();
        }
        if input.timestamp.is_empty() {
            input.timestamp = self.clock.timestamp();
        }
        Self::validate(&input)?;
        Ok(input)
    }

    /// Checks every required field, reporting all failures together
    pub fn validate(record: &Transaction) -> Result<(), ValidationError> {
        let mut errors = ValidationError::new();

        let required = [
            (Field::UserId, &record.user_id),
            (Field::Timestamp, &record.timestamp),
            (Field::Id, &record.id),
            (Field::Origin, &record.origin),
            (Field::OperationType, &record.operation_type),
        ];
        for (field, value) in required {
            if value.is_empty() {
                errors.push(field.name(), ViolationReason::Required);
                continue;
            }
            let max = match field {
                Field::UserId => MAX_USER_ID_LEN,
                Field::Timestamp => MAX_TIMESTAMP_LEN,
                _ => continue,
            };
            if value.len() > max {
                errors.push(field.name(), ViolationReason::TooLong { max });
            }
        }

        match record.amount {
            None => errors.push(Field::Amount.name(), ViolationReason::Required),
            Some(amount) if !amount.is_finite() => {
                errors.push(Field::Amount.name(), ViolationReason::NotFinite)
            }
            Some(amount) if amount < 0.0 => {
                errors.push(Field::Amount.name(), ViolationReason::Negative)
            }
            Some(_) => {}
        }

        errors.into_result(())
    }
}
