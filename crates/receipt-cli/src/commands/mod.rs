//! Subcommands and the state they share.

pub mod config;
pub mod export;
pub mod extract;
pub mod records;
pub mod scan;
pub mod summary;
pub mod sync;

use std::path::PathBuf;

use chrono::NaiveDate;
use tracing::debug;

use receipt_core::models::config::ReceiptConfig;
use receipt_core::JsonFileStore;

/// Paths given on the command line.
pub struct Context {
    config_path: Option<PathBuf>,
    store_path: Option<PathBuf>,
}

impl Context {
    pub fn new(config_path: Option<PathBuf>, store_path: Option<PathBuf>) -> Self {
        Self {
            config_path,
            store_path,
        }
    }

    /// Config file in use: `--config`, or the per-user default.
    pub fn config_path(&self) -> PathBuf {
        self.config_path.clone().unwrap_or_else(default_config_path)
    }

    /// Load the config file. A missing default file means default settings,
    /// a missing explicit file is an error.
    pub fn load_config(&self) -> anyhow::Result<ReceiptConfig> {
        let path = self.config_path();

        if path.exists() {
            debug!("Loading config from {}", path.display());
            Ok(ReceiptConfig::from_file(&path)?)
        } else if self.config_path.is_some() {
            anyhow::bail!("Config file not found: {}", path.display());
        } else {
            Ok(ReceiptConfig::default())
        }
    }

    /// Receipt database in use: `--store`, then config, then the data dir.
    pub fn store_path(&self, config: &ReceiptConfig) -> PathBuf {
        self.store_path
            .clone()
            .or_else(|| config.store.path.clone())
            .unwrap_or_else(default_store_path)
    }

    pub fn open_store(&self, config: &ReceiptConfig) -> anyhow::Result<JsonFileStore> {
        let path = self.store_path(config);
        debug!("Opening receipt store at {}", path.display());
        Ok(JsonFileStore::open(path)?)
    }
}

pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("receipt")
        .join("config.json")
}

fn default_store_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("receipt")
        .join("receipts.json")
}

/// First 8 characters of a receipt id, enough to address it on the command line.
pub fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}

/// Parse a `YYYY-MM-DD` command line date.
pub fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| format!("invalid date `{}`: {}", s, e))
}

/// Format yen with thousands separators (¥1,234).
pub fn format_yen(amount: u64) -> String {
    let digits = amount.to_string();
    let mut formatted = String::with_capacity(digits.len() + digits.len() / 3 + 2);
    formatted.push('¥');

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            formatted.push(',');
        }
        formatted.push(c);
    }

    formatted
}
