//! CLI Output Tests
//!
//! Runs the built binary:
//! - stdout carries exactly one JSON result per command
//! - log lines go to stderr only, filtered by TXLEDGER_LOG
//! - failures print `CODE: message` and exit non-zero

use std::path::Path;
use std::process::{Command, Output};

use serde_json::Value;
use tempfile::TempDir;

// =============================================================================
// Test Utilities
// =============================================================================

fn txledger(store: &Path, log_level: &str, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_txledger"))
        .args(args)
        .env("TXLEDGER_STORE_PATH", store)
        .env("TXLEDGER_LOG", log_level)
        .env_remove("TABLE_NAME")
        .env_remove("TXLEDGER_PAGE_SIZE")
        .output()
        .expect("Failed to run txledger")
}

fn stdout_json(output: &Output) -> Value {
    let text = String::from_utf8_lossy(&output.stdout);
    assert_eq!(text.lines().count(), 1, "stdout: {}", text);
    serde_json::from_str(&text).expect("stdout is not JSON")
}

fn stderr_events(output: &Output) -> Vec<Value> {
    String::from_utf8_lossy(&output.stderr)
        .lines()
        .filter_map(|line| serde_json::from_str::<Value>(line).ok())
        .filter(|value| value.get("event").is_some())
        .collect()
}

const BODY: &str = r#"{"user_id":"john","origin":"web","operation_type":"credit","amount":7}"#;

// =============================================================================
// Stream Separation
// =============================================================================

#[test]
fn test_logs_stay_off_stdout() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let store = dir.path().join("transactions.json");

    let output = txledger(&store, "info", &["create", "--body", BODY]);
    assert!(output.status.success());

    let created = stdout_json(&output);
    assert_eq!(created["user_id"], "john");
    assert!(created.get("event").is_none());

    let events = stderr_events(&output);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["event"], "TRANSACTION_CREATED");
    assert_eq!(events[0]["severity"], "INFO");
    assert_eq!(events[0]["user_id"], "john");
}

#[test]
fn test_threshold_silences_info_events() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let store = dir.path().join("transactions.json");

    let output = txledger(&store, "warn", &["create", "--body", BODY]);
    assert!(output.status.success());
    assert!(output.stderr.is_empty());
    assert_eq!(stdout_json(&output)["origin"], "web");

    let output = txledger(&store, "warn", &["purge"]);
    assert!(output.status.success());
    assert!(output.stderr.is_empty());
    assert_eq!(stdout_json(&output)["deleted"], 1);
}

// =============================================================================
// Failures
// =============================================================================

#[test]
fn test_failure_reports_code_on_stderr() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let store = dir.path().join("transactions.json");

    let output = txledger(&store, "error", &["list", "--user", "john", "--prefix", ""]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr
        .lines()
        .any(|line| line == "TX_VALIDATION_FAILED: validation failed: timestamp_prefix is required"));

    let events = stderr_events(&output);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["event"], "COMMAND_FAILED");
    assert_eq!(events[0]["code"], "TX_VALIDATION_FAILED");
}
