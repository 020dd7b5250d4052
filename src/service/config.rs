//! Service configuration
//!
//! Loaded from an optional JSON file, then overridden by environment
//! variables: `TABLE_NAME`, `TXLEDGER_STORE_PATH`, `TXLEDGER_PAGE_SIZE`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::planner::{PlannerConfig, DEFAULT_PAGE_SIZE};

use super::errors::ConfigError;

/// Service configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Table holding transaction rows (default: "Transactions")
    #[serde(default = "default_table_name")]
    pub table_name: String,

    /// Page cap for requests without a limit (default: 100)
    #[serde(default = "default_page_size")]
    pub default_page_size: u32,

    /// Backing file of the file store (default: "./transactions.json")
    #[serde(default = "default_store_path")]
    pub store_path: PathBuf,
}

fn default_table_name() -> String {
    "Transactions".to_string()
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

fn default_store_path() -> PathBuf {
    PathBuf::from("./transactions.json")
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            table_name: default_table_name(),
            default_page_size: default_page_size(),
            store_path: default_store_path(),
        }
    }
}

impl ServiceConfig {
    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let config: ServiceConfig =
            serde_json::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Applies overrides from the process environment
    pub fn with_env_overrides(self) -> Result<Self, ConfigError> {
        self.with_overrides(|name| std::env::var(name).ok())
    }

    /// Applies overrides from a variable lookup. Empty values are ignored.
    pub fn with_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(table) = get("TABLE_NAME") {
            self.table_name = table;
        }
        if let Some(path) = get("TXLEDGER_STORE_PATH") {
            self.store_path = PathBuf::from(path);
        }
        if let Some(size) = get("TXLEDGER_PAGE_SIZE") {
            self.default_page_size = size.trim().parse().map_err(|_| {
                ConfigError::Invalid(format!("TXLEDGER_PAGE_SIZE must be an integer, got '{}'", size))
            })?;
        }

        self.validate()?;
        Ok(self)
    }

    /// Planner settings derived from this configuration
    pub fn planner_config(&self) -> PlannerConfig {
        PlannerConfig {
            default_limit: self.default_page_size,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.table_name.trim().is_empty() {
            return Err(ConfigError::Invalid("table_name must not be empty".to_string()));
        }
        if self.default_page_size == 0 {
            return Err(ConfigError::Invalid("default_page_size must be > 0".to_string()));
        }
        Ok(())
    }
}
