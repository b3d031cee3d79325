//! WASM bindings for medical receipt amount extraction.
//!
//! OCR runs in the browser (for example tesseract.js with the `jpn` model);
//! these bindings take its transcript and keep the running deduction total.

use wasm_bindgen::prelude::*;

use receipt_core::models::DEFAULT_DEDUCTION_THRESHOLD;
use receipt_core::{DeductionSummary, MemoryStore, ReceiptRecord, ReceiptStore};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Extract the receipt total (yen) from an OCR transcript. 0 when none found.
#[wasm_bindgen]
pub fn extract_amount(text: &str) -> f64 {
    receipt_core::extract_amount(text) as f64
}

/// Extract the total together with the rule that produced it.
#[wasm_bindgen]
pub fn explain_amount(text: &str) -> Result<JsValue, JsValue> {
    to_js(&receipt_core::explain_amount(text))
}

/// Summarize amounts against a deduction threshold (default 100,000 yen).
#[wasm_bindgen]
pub fn summarize(amounts: Vec<f64>, threshold: Option<f64>) -> Result<JsValue, JsValue> {
    let threshold = threshold.map(to_yen).transpose()?.unwrap_or(DEFAULT_DEDUCTION_THRESHOLD);
    let amounts = amounts.into_iter().map(to_yen).collect::<Result<Vec<_>, _>>()?;

    to_js(&DeductionSummary::from_amounts(amounts, threshold))
}

/// In-browser receipt list with a running deduction summary.
#[wasm_bindgen]
pub struct ReceiptLedger {
    store: MemoryStore,
    threshold: u64,
}

#[wasm_bindgen]
impl ReceiptLedger {
    /// Create an empty ledger.
    #[wasm_bindgen(constructor)]
    pub fn new(threshold: Option<f64>) -> Result<ReceiptLedger, JsValue> {
        let threshold = threshold.map(to_yen).transpose()?.unwrap_or(DEFAULT_DEDUCTION_THRESHOLD);
        Ok(Self {
            store: MemoryStore::new(),
            threshold,
        })
    }

    /// Register a receipt awaiting OCR. Returns its id.
    #[wasm_bindgen]
    pub fn add_pending(&mut self, file_name: &str) -> Result<String, JsValue> {
        let record = ReceiptRecord::pending_today(file_name);
        let id = record.id.clone();
        self.store.insert(record).map_err(to_js_error)?;
        Ok(id)
    }

    /// Attach the OCR transcript to a pending receipt. Returns the amount.
    #[wasm_bindgen]
    pub fn complete(&mut self, id: &str, transcript: &str) -> Result<f64, JsValue> {
        let mut record = self.store.get(id).map_err(to_js_error)?;
        record.complete(transcript);
        let amount = record.amount;
        self.store.update(record).map_err(to_js_error)?;
        Ok(amount as f64)
    }

    /// Mark OCR of a receipt as failed.
    #[wasm_bindgen]
    pub fn fail(&mut self, id: &str) -> Result<(), JsValue> {
        let mut record = self.store.get(id).map_err(to_js_error)?;
        record.fail();
        self.store.update(record).map_err(to_js_error)
    }

    /// Add a receipt with its transcript in one step. Returns its id.
    #[wasm_bindgen]
    pub fn add_transcript(&mut self, file_name: &str, transcript: &str) -> Result<String, JsValue> {
        let id = self.add_pending(file_name)?;
        self.complete(&id, transcript)?;
        Ok(id)
    }

    /// Correct the amount of a receipt by hand.
    #[wasm_bindgen]
    pub fn set_amount(&mut self, id: &str, amount: f64) -> Result<(), JsValue> {
        let mut record = self.store.get(id).map_err(to_js_error)?;
        record.set_amount(to_yen(amount)?);
        self.store.update(record).map_err(to_js_error)
    }

    /// Remove a receipt. Returns false if it did not exist.
    #[wasm_bindgen]
    pub fn remove(&mut self, id: &str) -> bool {
        self.store.remove(id).is_ok()
    }

    /// Remove all receipts.
    #[wasm_bindgen]
    pub fn clear(&mut self) {
        self.store = MemoryStore::new();
    }

    /// Number of receipts.
    #[wasm_bindgen(getter)]
    pub fn length(&self) -> usize {
        self.store.len()
    }

    /// Sum of all receipt amounts.
    #[wasm_bindgen]
    pub fn total(&self) -> f64 {
        self.current_summary().total as f64
    }

    /// Deduction summary of all receipts.
    #[wasm_bindgen]
    pub fn summary(&self) -> Result<JsValue, JsValue> {
        to_js(&self.current_summary())
    }

    /// All receipts in date order.
    #[wasm_bindgen]
    pub fn records(&self) -> Result<JsValue, JsValue> {
        let records = self.store.list().map_err(to_js_error)?;
        to_js(&records)
    }
}

impl ReceiptLedger {
    fn current_summary(&self) -> DeductionSummary {
        let records = self.store.list().unwrap_or_default();
        DeductionSummary::compute(&records, self.threshold)
    }
}

fn to_yen(value: f64) -> Result<u64, JsValue> {
    if value.is_finite() && value >= 0.0 {
        Ok(value.round() as u64)
    } else {
        Err(JsValue::from_str(&format!("invalid amount: {}", value)))
    }
}

fn to_js<T: serde::Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn to_js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_extract_amount() {
        assert_eq!(extract_amount("お釣り 500\n合計 1,200\n消費税 100"), 1200.0);
        assert_eq!(extract_amount(""), 0.0);
    }

    #[wasm_bindgen_test]
    fn test_to_yen() {
        assert_eq!(to_yen(1200.0).ok(), Some(1200));
        assert_eq!(to_yen(99.6).ok(), Some(100));
        assert!(to_yen(-1.0).is_err());
        assert!(to_yen(f64::NAN).is_err());
    }

    #[wasm_bindgen_test]
    fn test_ledger_flow() {
        let mut ledger = ReceiptLedger::new(None).unwrap();

        let clinic = ledger.add_transcript("clinic.jpg", "請求金額 80,000").unwrap();
        let pending = ledger.add_pending("pharmacy.jpg").unwrap();
        assert_eq!(ledger.complete(&pending, "ありがとうございました").unwrap(), 0.0);

        ledger.set_amount(&pending, 30_000.0).unwrap();
        assert_eq!(ledger.total(), 110_000.0);
        assert_eq!(ledger.current_summary().deductible, 10_000);

        assert!(ledger.remove(&clinic));
        assert!(!ledger.remove(&clinic));
        assert_eq!(ledger.length(), 1);

        ledger.clear();
        assert_eq!(ledger.total(), 0.0);
    }

    #[wasm_bindgen_test]
    fn test_unknown_id() {
        let mut ledger = ReceiptLedger::new(Some(50_000.0)).unwrap();
        assert!(ledger.complete("missing", "合計 1").is_err());
        assert!(ledger.set_amount("missing", 1.0).is_err());
    }
}
