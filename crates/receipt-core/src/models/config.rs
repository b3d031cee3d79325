//! Configuration structures for the receipt pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::summary::DEFAULT_DEDUCTION_THRESHOLD;

/// Main configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReceiptConfig {
    /// OCR engine configuration.
    pub ocr: OcrConfig,

    /// Deduction calculation configuration.
    pub deduction: DeductionConfig,

    /// Receipt storage configuration.
    pub store: StoreConfig,

    /// Spreadsheet webhook configuration.
    pub webhook: WebhookConfig,
}

/// OCR engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// OCR executable name or path.
    pub program: String,

    /// Language hint passed to the engine.
    pub language: String,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            program: "tesseract".to_string(),
            language: "jpn".to_string(),
        }
    }
}

/// Deduction calculation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DeductionConfig {
    /// Threshold in yen the yearly total must exceed.
    pub threshold: u64,
}

impl Default for DeductionConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_DEDUCTION_THRESHOLD,
        }
    }
}

/// Receipt storage configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Path of the receipt database file (default: data dir).
    pub path: Option<PathBuf>,
}

/// Spreadsheet webhook configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WebhookConfig {
    /// Webhook URL. Delivery is disabled when unset.
    pub url: Option<String>,

    /// Send the receipt image along with the record.
    pub include_image: bool,

    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            url: None,
            include_image: true,
            timeout_secs: 30,
        }
    }
}

impl ReceiptConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }
}
