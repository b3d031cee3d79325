//! Error types for the receipt-core library.
//!
//! Amount extraction is infallible and has no error type; these errors
//! belong to the collaborators around it.

use thiserror::Error;

/// Errors raised by an OCR engine.
#[derive(Error, Debug)]
pub enum OcrError {
    /// The OCR executable could not be started.
    #[error("failed to launch OCR engine `{program}`: {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The OCR engine ran but reported a failure.
    #[error("OCR engine exited with {status}: {stderr}")]
    Failed { status: String, stderr: String },

    /// The input image does not exist or cannot be read.
    #[error("invalid image: {0}")]
    InvalidImage(String),

    /// The engine produced output that is not valid UTF-8.
    #[error("OCR output is not valid UTF-8")]
    Encoding,
}

/// Errors related to receipt storage.
#[derive(Error, Debug)]
pub enum StoreError {
    /// No record with the given id.
    #[error("receipt not found: {0}")]
    NotFound(String),

    /// A record with the same id already exists.
    #[error("receipt already exists: {0}")]
    Duplicate(String),

    /// An id prefix matches more than one record.
    #[error("receipt id prefix is ambiguous: {0}")]
    Ambiguous(String),

    /// Failed to read or write the backing file.
    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing file is not valid JSON.
    #[error("store data is corrupt: {0}")]
    Serde(#[from] serde_json::Error),
}
