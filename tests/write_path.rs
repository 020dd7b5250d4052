//! Write Path Tests
//!
//! - assigned sort keys follow the fixed microsecond format
//! - every missing field is reported at once
//! - records written through the file store survive reopen

use regex::Regex;
use tempfile::TempDir;

use txledger::model::{parse_timestamp, Transaction, ViolationReason};
use txledger::planner::ListRequest;
use txledger::service::{ServiceConfig, TransactionService};
use txledger::store::{FileStore, TransactionStore};
use txledger::writer::KeyAssigner;

// =============================================================================
// Test Utilities
// =============================================================================

fn timestamp_shape() -> Regex {
    Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}\.\d{6}Z$").unwrap()
}

fn open(dir: &TempDir) -> TransactionService<FileStore> {
    let config = ServiceConfig {
        store_path: dir.path().join("transactions.json"),
        ..ServiceConfig::default()
    };
    let store = FileStore::open(&config.store_path, &config.table_name).unwrap();
    TransactionService::new(store, &config)
}

// =============================================================================
// Key Assignment
// =============================================================================

#[test]
fn test_assigned_timestamp_shape() {
    let assigner = KeyAssigner::new();
    let tr = assigner
        .prepare(Transaction::new("john", "web", "credit", 25.0))
        .unwrap();

    assert!(timestamp_shape().is_match(&tr.timestamp), "{}", tr.timestamp);
    assert!(parse_timestamp(&tr.timestamp).is_some());
    assert_eq!(tr.id.len(), 36);
}

#[test]
fn test_rapid_writes_get_distinct_ascending_keys() {
    let assigner = KeyAssigner::new();
    let stamps: Vec<String> = (0..200)
        .map(|_| {
            assigner
                .prepare(Transaction::new("john", "web", "credit", 1.0))
                .unwrap()
                .timestamp
        })
        .collect();

    for pair in stamps.windows(2) {
        assert!(pair[0] < pair[1], "{} !< {}", pair[0], pair[1]);
    }
}

#[test]
fn test_empty_input_lists_every_missing_field() {
    let err = KeyAssigner::new().prepare(Transaction::default()).unwrap_err();
    assert_eq!(
        err.fields(),
        vec!["user_id", "origin", "operation_type", "amount"]
    );
    assert!(err
        .violations()
        .iter()
        .all(|v| v.reason == ViolationReason::Required));

    let err = KeyAssigner::validate(&Transaction::default()).unwrap_err();
    assert_eq!(err.violations().len(), 6);
}

#[test]
fn test_negative_amount_rejected() {
    let err = KeyAssigner::new()
        .prepare(Transaction::new("john", "web", "debit", -5.0))
        .unwrap_err();
    assert_eq!(err.fields(), vec!["amount"]);
    assert_eq!(err.violations()[0].reason, ViolationReason::Negative);
}

// =============================================================================
// File Store
// =============================================================================

#[test]
fn test_created_records_survive_reopen() {
    let dir = TempDir::new().expect("Failed to create temp dir");

    let created = {
        let svc = open(&dir);
        let a = svc.create(Transaction::new("john", "web", "credit", 10.0)).unwrap();
        let b = svc.create(Transaction::new("john", "ios", "debit", 4.5)).unwrap();
        svc.create(Transaction::new("jane", "web", "credit", 1.0)).unwrap();
        vec![a, b]
    };

    let svc = open(&dir);
    assert_eq!(svc.scan().unwrap().len(), 3);

    let prefix = &created[0].timestamp[..4];
    let page = svc.list(&ListRequest::new("john", prefix)).unwrap();
    assert_eq!(page.items, created);
    assert!(!page.has_more());
}

#[test]
fn test_rejected_record_is_not_persisted() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let svc = open(&dir);

    assert!(svc.create(Transaction::new("", "web", "credit", 1.0)).is_err());
    assert!(svc.store().scan().unwrap().is_empty());
    assert!(open(&dir).scan().unwrap().is_empty());
}
