//! Receipt record model.

use std::path::PathBuf;

use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::amount::{explain_amount, AmountMatch};

/// Processing state of a receipt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReceiptStatus {
    /// Waiting for OCR.
    #[default]
    Processing,
    /// OCR finished and an amount was extracted.
    Done,
    /// OCR failed.
    Error,
}

impl std::fmt::Display for ReceiptStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Processing => "processing",
            Self::Done => "done",
            Self::Error => "error",
        };
        f.write_str(s)
    }
}

/// One uploaded receipt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiptRecord {
    /// Unique identifier.
    pub id: String,

    /// Original file name of the receipt image or transcript.
    pub file_name: String,

    /// Total in yen. 0 when no amount was found.
    pub amount: u64,

    /// Receipt date.
    pub date: NaiveDate,

    /// Processing state.
    #[serde(default)]
    pub status: ReceiptStatus,

    /// OCR transcript.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub raw_text: Option<String>,

    /// Location of the stored receipt image.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub image_path: Option<PathBuf>,

    /// Set once the amount was corrected by hand.
    #[serde(default)]
    pub amount_overridden: bool,

    /// When the record was created.
    pub created_at: DateTime<Utc>,
}

impl ReceiptRecord {
    /// Create a record awaiting OCR.
    pub fn pending(file_name: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            file_name: file_name.into(),
            amount: 0,
            date,
            status: ReceiptStatus::Processing,
            raw_text: None,
            image_path: None,
            amount_overridden: false,
            created_at: Utc::now(),
        }
    }

    /// Create a record dated today (local time).
    pub fn pending_today(file_name: impl Into<String>) -> Self {
        Self::pending(file_name, Local::now().date_naive())
    }

    /// Attach the receipt image location.
    pub fn with_image(mut self, path: impl Into<PathBuf>) -> Self {
        self.image_path = Some(path.into());
        self
    }

    /// Store the OCR transcript and extract the amount from it.
    ///
    /// A manually corrected amount is kept.
    pub fn complete(&mut self, transcript: impl Into<String>) -> AmountMatch {
        let transcript = transcript.into();
        let found = explain_amount(&transcript);

        if !self.amount_overridden {
            self.amount = found.value;
        }
        self.raw_text = Some(transcript);
        self.status = ReceiptStatus::Done;

        found
    }

    /// Mark OCR as failed.
    pub fn fail(&mut self) {
        self.status = ReceiptStatus::Error;
    }

    /// Correct the amount by hand.
    pub fn set_amount(&mut self, amount: u64) {
        self.amount = amount;
        self.amount_overridden = true;
    }

    /// Whether a person should look at this record.
    ///
    /// A zero amount is ambiguous between "nothing found" and a free receipt,
    /// so it counts as unresolved until someone confirms it. A failed record
    /// is resolved once its amount was entered by hand.
    pub fn needs_review(&self) -> bool {
        match self.status {
            ReceiptStatus::Error => !self.amount_overridden,
            ReceiptStatus::Done => self.amount == 0 && !self.amount_overridden,
            ReceiptStatus::Processing => false,
        }
    }

    /// Receipt date in the short Japanese form (2024/3/5).
    pub fn display_date(&self) -> String {
        self.date.format("%Y/%-m/%-d").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()
    }

    #[test]
    fn test_pending_record() {
        let record = ReceiptRecord::pending("scan.jpg", date());
        assert_eq!(record.status, ReceiptStatus::Processing);
        assert_eq!(record.amount, 0);
        assert!(!record.needs_review());
        assert_eq!(record.id.len(), 36);
    }

    #[test]
    fn test_ids_are_unique() {
        let a = ReceiptRecord::pending("a.jpg", date());
        let b = ReceiptRecord::pending("a.jpg", date());
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_complete_extracts_amount() {
        let mut record = ReceiptRecord::pending("scan.jpg", date());
        let found = record.complete("内科クリニック\n合計 3,450円");

        assert_eq!(found.value, 3450);
        assert_eq!(record.amount, 3450);
        assert_eq!(record.status, ReceiptStatus::Done);
        assert_eq!(record.raw_text.as_deref(), Some("内科クリニック\n合計 3,450円"));
    }

    #[test]
    fn test_zero_amount_needs_review_until_overridden() {
        let mut record = ReceiptRecord::pending("blurry.jpg", date());
        record.complete("ありがとうございました");
        assert!(record.needs_review());

        record.set_amount(0);
        assert!(!record.needs_review());
    }

    #[test]
    fn test_override_survives_reprocessing() {
        let mut record = ReceiptRecord::pending("scan.jpg", date());
        record.set_amount(1500);
        record.complete("合計 9,999");
        assert_eq!(record.amount, 1500);
    }

    #[test]
    fn test_failed_record() {
        let mut record = ReceiptRecord::pending("scan.jpg", date());
        record.fail();
        assert_eq!(record.status, ReceiptStatus::Error);
        assert!(record.needs_review());
    }

    #[test]
    fn test_failed_record_resolved_by_manual_amount() {
        let mut record = ReceiptRecord::pending("scan.jpg", date());
        record.fail();
        record.set_amount(5000);

        assert_eq!(record.status, ReceiptStatus::Error);
        assert_eq!(record.amount, 5000);
        assert!(!record.needs_review());
    }

    #[test]
    fn test_default_status() {
        assert_eq!(ReceiptStatus::default(), ReceiptStatus::Processing);
    }

    #[test]
    fn test_display_date() {
        let record = ReceiptRecord::pending("scan.jpg", date());
        assert_eq!(record.display_date(), "2024/3/5");
    }

    #[test]
    fn test_serde_shape() {
        let mut record = ReceiptRecord::pending("scan.jpg", date());
        record.complete("合計 100");
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["status"], "done");
        assert_eq!(json["date"], "2024-03-05");
        assert!(json.get("image_path").is_none());

        let back: ReceiptRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }
}
