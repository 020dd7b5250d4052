//! CLI module for txledger
//!
//! Provides command-line interface for:
//! - create: Record one transaction
//! - list: One page of a user's history, or its store expression
//! - scan / delete / purge: Operator maintenance

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{create, load_config, run, run_cli, run_command};
pub use errors::{CliError, CliResult};
pub use io::{parse_body, read_body, write_response};
