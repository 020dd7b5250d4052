//! Write path
//!
//! New records pass through the [`KeyAssigner`] before persistence: it
//! fills the identity and sort-key fields and rejects incomplete records.

mod assigner;

pub use assigner::KeyAssigner;
