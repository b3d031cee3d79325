//! Payload delivered to the spreadsheet webhook.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::receipt::ReceiptRecord;

/// JSON body posted for one finalized receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookPayload {
    /// Receipt date, short Japanese form.
    pub date: String,
    /// Amount in yen.
    pub amount: u64,
    /// OCR transcript, empty when unavailable.
    pub text: String,
    pub file_name: String,
    pub id: String,
    /// Base64 image data without a data URL prefix, empty when unavailable.
    pub image: String,
    /// MIME type of `image`.
    pub mime_type: String,
}

impl WebhookPayload {
    /// Build a payload without image data.
    pub fn from_record(record: &ReceiptRecord) -> Self {
        Self {
            date: record.display_date(),
            amount: record.amount,
            text: record.raw_text.clone().unwrap_or_default(),
            file_name: record.file_name.clone(),
            id: record.id.clone(),
            image: String::new(),
            mime_type: String::new(),
        }
    }

    /// Attach base64 image data.
    pub fn with_image(mut self, image_base64: String, mime_type: impl Into<String>) -> Self {
        self.image = image_base64;
        self.mime_type = mime_type.into();
        self
    }
}

/// Guess an image MIME type from the file extension.
pub fn mime_type_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "tif" | "tiff" => "image/tiff",
        "heic" => "image/heic",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_payload_from_record() {
        let date = NaiveDate::from_ymd_opt(2024, 11, 2).unwrap();
        let mut record = ReceiptRecord::pending("clinic.jpg", date);
        record.complete("合計 2,310");

        let payload = WebhookPayload::from_record(&record).with_image("AAAA".into(), "image/jpeg");
        let json = serde_json::to_value(&payload).unwrap();

        assert_eq!(json["date"], "2024/11/2");
        assert_eq!(json["amount"], 2310);
        assert_eq!(json["fileName"], "clinic.jpg");
        assert_eq!(json["mimeType"], "image/jpeg");
        assert_eq!(json["text"], "合計 2,310");
        assert_eq!(json["id"], record.id.as_str());
    }

    #[test]
    fn test_mime_type_for() {
        assert_eq!(mime_type_for(Path::new("a.JPG")), "image/jpeg");
        assert_eq!(mime_type_for(Path::new("a.png")), "image/png");
        assert_eq!(mime_type_for(Path::new("a")), "application/octet-stream");
    }
}
