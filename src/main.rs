//! txledger CLI entry point
//!
//! Parses arguments and dispatches via `cli::run`. Errors are printed to
//! stderr as `CODE: message` with a non-zero exit.

use txledger::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}: {}", e.code(), e);
        std::process::exit(1);
    }
}
