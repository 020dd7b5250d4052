//! CLI argument definitions using clap
//!
//! Commands:
//! - txledger create --body <json>
//! - txledger list --user <id> --prefix <ts> [filters] [--after] [--limit]
//! - txledger scan
//! - txledger delete --user <id> --timestamp <ts>
//! - txledger purge

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// txledger - immutable transaction ledger with cursor pagination
#[derive(Parser, Debug)]
#[command(name = "txledger")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to a JSON configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Record a new transaction
    Create {
        /// Transaction JSON, or "-" to read it from stdin
        #[arg(long)]
        body: String,
    },

    /// List one page of a user's transactions
    List {
        /// Partition key
        #[arg(long)]
        user: String,

        /// Sort key prefix, e.g. 2021-01
        #[arg(long)]
        prefix: String,

        /// Only transactions from this origin
        #[arg(long)]
        origin: Option<String>,

        /// Only transactions of this operation type
        #[arg(long)]
        operation_type: Option<String>,

        /// Cursor returned by the previous page
        #[arg(long)]
        after: Option<String>,

        /// Page size cap
        #[arg(long, allow_hyphen_values = true)]
        limit: Option<i32>,

        /// Print the store expression instead of running the query
        #[arg(long)]
        explain: bool,
    },

    /// Print every stored transaction
    Scan,

    /// Delete one transaction by key
    Delete {
        /// Partition key
        #[arg(long)]
        user: String,

        /// Exact sort key
        #[arg(long)]
        timestamp: String,
    },

    /// Delete every transaction
    Purge,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
