//! Core library for medical receipt processing.
//!
//! This crate provides:
//! - Total amount extraction from Japanese receipt OCR transcripts
//! - Receipt records and the medical expense deduction summary
//! - Interfaces for the OCR engine and receipt storage collaborators

pub mod amount;
pub mod error;
pub mod models;
pub mod ocr;
pub mod store;

pub use amount::{explain_amount, extract_amount, tokenize, AmountMatch, AmountSource};
pub use error::{OcrError, StoreError};
pub use models::receipt::{ReceiptRecord, ReceiptStatus};
pub use models::summary::DeductionSummary;
pub use ocr::OcrEngine;
#[cfg(feature = "native")]
pub use ocr::TesseractCli;
pub use store::{MemoryStore, ReceiptStore};
#[cfg(feature = "native")]
pub use store::JsonFileStore;
