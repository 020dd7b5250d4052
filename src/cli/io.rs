//! JSON I/O handling for CLI
//!
//! - Input: a transaction body given inline or via stdin (`-`)
//! - Output: a single JSON object on stdout

use std::io::{self, Read, Write};

use serde::Serialize;
use serde_json::Value;

use super::errors::{CliError, CliResult};

/// Resolves a `--body` argument into a JSON value
pub fn read_body(arg: &str) -> CliResult<Value> {
    let text = if arg == "-" {
        let mut buf = String::new();
        io::stdin().lock().read_to_string(&mut buf)?;
        buf
    } else {
        arg.to_string()
    };

    parse_body(&text)
}

/// Parses a body; blank input is rejected
pub fn parse_body(text: &str) -> CliResult<Value> {
    if text.trim().is_empty() {
        return Err(CliError::io_error("Empty input"));
    }
    serde_json::from_str(text).map_err(|e| CliError::InvalidInput(e.to_string()))
}

/// Write a success response to stdout
pub fn write_response<T: Serialize>(data: &T) -> CliResult<()> {
    let mut stdout = io::stdout();
    serde_json::to_writer(&mut stdout, data)?;
    writeln!(stdout)?;
    stdout.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_body() {
        let value = parse_body(r#"{"user_id":"john","amount":1.5}"#).unwrap();
        assert_eq!(value["user_id"], "john");
    }

    #[test]
    fn test_blank_body_rejected() {
        assert_eq!(parse_body("  \n").unwrap_err().code(), "TX_CLI_IO_ERROR");
    }

    #[test]
    fn test_malformed_body_rejected() {
        assert_eq!(parse_body("{").unwrap_err().code(), "TX_CLI_INVALID_INPUT");
    }
}
