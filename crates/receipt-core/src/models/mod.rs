//! Data models for receipts, deduction totals and configuration.

pub mod config;
pub mod receipt;
pub mod summary;
pub mod webhook;

pub use config::ReceiptConfig;
pub use receipt::{ReceiptRecord, ReceiptStatus};
pub use summary::{DeductionSummary, DEFAULT_DEDUCTION_THRESHOLD};
pub use webhook::WebhookPayload;
