//! CLI command implementations
//!
//! Each command runs against a [`TransactionService`] and yields the JSON
//! value printed on stdout.

use std::path::Path;

use serde_json::{json, Value};

use crate::model::{Transaction, TransactionKey};
use crate::observability::Logger;
use crate::planner::ListRequest;
use crate::service::{ServiceConfig, TransactionService};
use crate::store::{FileStore, TransactionStore};

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};
use super::io::{read_body, write_response};

/// Main entry point for CLI
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    let result = run_cli(cli);
    if let Err(e) = &result {
        let message = e.to_string();
        Logger::error("COMMAND_FAILED", &[("code", e.code()), ("error", message.as_str())]);
    }
    result
}

/// Loads configuration, opens the file store and runs one command
pub fn run_cli(cli: Cli) -> CliResult<()> {
    let config = load_config(cli.config.as_deref())?;
    let store = FileStore::open(&config.store_path, &config.table_name)?;
    let service = TransactionService::new(store, &config);

    let output = run_command(&service, cli.command)?;
    write_response(&output)
}

/// Resolves the effective configuration: file (if any), then environment
pub fn load_config(path: Option<&Path>) -> CliResult<ServiceConfig> {
    let config = match path {
        Some(path) => ServiceConfig::load(path)?,
        None => ServiceConfig::default(),
    };
    Ok(config.with_env_overrides()?)
}

/// Run the appropriate command based on CLI args
pub fn run_command<S: TransactionStore>(
    service: &TransactionService<S>,
    cmd: Command,
) -> CliResult<Value> {
    match cmd {
        Command::Create { body } => create(service, &read_body(&body)?),
        Command::List {
            user,
            prefix,
            origin,
            operation_type,
            after,
            limit,
            explain,
        } => {
            let req = ListRequest {
                user_id: user,
                timestamp_prefix: prefix,
                origin,
                operation_type,
                after,
                limit,
            };
            if explain {
                Ok(serde_json::to_value(service.explain(&req)?)?)
            } else {
                Ok(serde_json::to_value(service.list(&req)?)?)
            }
        }
        Command::Scan => Ok(json!({ "items": service.scan()? })),
        Command::Delete { user, timestamp } => {
            let deleted = service.delete(&TransactionKey::new(user, timestamp))?;
            Ok(json!({ "deleted": deleted }))
        }
        Command::Purge => Ok(json!({ "deleted": service.delete_all()? })),
    }
}

/// Records one transaction from a JSON body
///
/// `ts` and `tr_id` are assigned only when the body leaves them empty;
/// supplied values are kept.
pub fn create<S: TransactionStore>(
    service: &TransactionService<S>,
    body: &Value,
) -> CliResult<Value> {
    if !body.is_object() {
        return Err(CliError::InvalidInput(
            "transaction body must be a JSON object".to_string(),
        ));
    }
    let input: Transaction = serde_json::from_value(body.clone())
        .map_err(|e| CliError::InvalidInput(e.to_string()))?;

    let record = service.create(input)?;
    Ok(serde_json::to_value(record)?)
}
