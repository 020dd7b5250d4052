//! Sortable sort-key timestamps
//!
//! Sort keys are UTC instants rendered with a fixed width and exactly six
//! fractional digits, so lexicographic order equals chronological order:
//! `2021-01-01T00:00:00.000000Z`.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, NaiveDateTime, Utc};

/// chrono format string of the sort key
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6fZ";

const MICROS_PER_SECOND: i64 = 1_000_000;

/// Renders an instant as a sort key
pub fn format_timestamp(instant: DateTime<Utc>) -> String {
    instant.format(TIMESTAMP_FORMAT).to_string()
}

/// Parses a sort key back into an instant
pub fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(text, TIMESTAMP_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}

/// Issues strictly increasing microsecond instants for one process.
///
/// A wall-clock reading that does not advance past the previously issued
/// instant is bumped by one microsecond.
#[derive(Debug, Default)]
pub struct MonotonicClock {
    last_micros: AtomicI64,
}

impl MonotonicClock {
    /// Creates a clock that has issued nothing yet
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues the next instant
    pub fn now(&self) -> DateTime<Utc> {
        let micros = self.issue(Utc::now().timestamp_micros());
        let secs = micros.div_euclid(MICROS_PER_SECOND);
        // rem_euclid keeps this in 0..1_000_000, so the nanos fit in u32
        let nanos = (micros.rem_euclid(MICROS_PER_SECOND) * 1_000) as u32;
        DateTime::from_timestamp(secs, nanos).unwrap_or_else(Utc::now)
    }

    /// Issues the next sort key
    pub fn timestamp(&self) -> String {
        format_timestamp(self.now())
    }

    /// Records an observed wall-clock reading and returns the instant to issue
    fn issue(&self, observed: i64) -> i64 {
        let mut previous = self.last_micros.load(Ordering::Acquire);
        loop {
            let next = observed.max(previous.saturating_add(1));
            match self.last_micros.compare_exchange_weak(
                previous,
                next,
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => return next,
                Err(current) => previous = current,
            }
        }
    }
}
