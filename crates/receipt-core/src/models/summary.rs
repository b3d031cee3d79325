//! Medical expense deduction summary.

use serde::{Deserialize, Serialize};

use super::receipt::ReceiptRecord;

/// Common deduction threshold in yen (10万円).
pub const DEFAULT_DEDUCTION_THRESHOLD: u64 = 100_000;

/// Cumulative receipt total compared against the deduction threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionSummary {
    /// Number of receipts counted.
    pub receipt_count: usize,
    /// Receipts that still need a human to confirm the amount.
    pub unresolved: usize,
    /// Sum of all receipt amounts.
    pub total: u64,
    /// Threshold the total must exceed.
    pub threshold: u64,
    /// Estimated deductible amount (total above the threshold).
    pub deductible: u64,
    /// Amount still missing to reach the threshold.
    pub remaining: u64,
    /// Whether the total exceeds the threshold.
    pub eligible: bool,
}

impl DeductionSummary {
    /// Summarize plain amounts.
    pub fn from_amounts<I>(amounts: I, threshold: u64) -> Self
    where
        I: IntoIterator<Item = u64>,
    {
        let mut receipt_count = 0;
        let mut unresolved = 0;
        let mut total: u64 = 0;

        for amount in amounts {
            receipt_count += 1;
            if amount == 0 {
                unresolved += 1;
            }
            total = total.saturating_add(amount);
        }

        Self::build(receipt_count, unresolved, total, threshold)
    }

    /// Summarize stored receipt records.
    pub fn compute(records: &[ReceiptRecord], threshold: u64) -> Self {
        let total = records
            .iter()
            .fold(0u64, |sum, r| sum.saturating_add(r.amount));
        let unresolved = records.iter().filter(|r| r.needs_review()).count();

        Self::build(records.len(), unresolved, total, threshold)
    }

    fn build(receipt_count: usize, unresolved: usize, total: u64, threshold: u64) -> Self {
        let eligible = total > threshold;

        Self {
            receipt_count,
            unresolved,
            total,
            threshold,
            deductible: total.saturating_sub(threshold),
            remaining: if eligible { 0 } else { threshold - total },
            eligible,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_below_threshold() {
        let summary = DeductionSummary::from_amounts([30_000, 20_000], DEFAULT_DEDUCTION_THRESHOLD);
        assert_eq!(summary.total, 50_000);
        assert!(!summary.eligible);
        assert_eq!(summary.deductible, 0);
        assert_eq!(summary.remaining, 50_000);
    }

    #[test]
    fn test_exactly_at_threshold_is_not_eligible() {
        let summary = DeductionSummary::from_amounts([100_000], DEFAULT_DEDUCTION_THRESHOLD);
        assert!(!summary.eligible);
        assert_eq!(summary.deductible, 0);
        assert_eq!(summary.remaining, 0);
    }

    #[test]
    fn test_above_threshold() {
        let summary = DeductionSummary::from_amounts([80_000, 45_500, 0], DEFAULT_DEDUCTION_THRESHOLD);
        assert!(summary.eligible);
        assert_eq!(summary.deductible, 25_500);
        assert_eq!(summary.remaining, 0);
        assert_eq!(summary.receipt_count, 3);
        assert_eq!(summary.unresolved, 1);
    }

    #[test]
    fn test_empty() {
        let summary = DeductionSummary::compute(&[], 100);
        assert_eq!(summary.total, 0);
        assert_eq!(summary.remaining, 100);
        assert_eq!(summary.receipt_count, 0);
    }

    #[test]
    fn test_saturates() {
        let summary = DeductionSummary::from_amounts([u64::MAX, 5], 0);
        assert_eq!(summary.total, u64::MAX);
    }

    #[test]
    fn test_compute_from_records() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        let mut a = ReceiptRecord::pending("a.jpg", date);
        a.complete("合計 60,000");
        let mut b = ReceiptRecord::pending("b.jpg", date);
        b.complete("請求金額 55,000");
        let mut c = ReceiptRecord::pending("c.jpg", date);
        c.complete("");

        let summary = DeductionSummary::compute(&[a, b, c], DEFAULT_DEDUCTION_THRESHOLD);
        assert_eq!(summary.total, 115_000);
        assert_eq!(summary.deductible, 15_000);
        assert_eq!(summary.unresolved, 1);
    }

    #[test]
    fn test_records_and_amounts_agree_on_unresolved() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let mut corrected = ReceiptRecord::pending("torn.jpg", date);
        corrected.fail();
        corrected.set_amount(5000);
        let mut failed = ReceiptRecord::pending("blank.jpg", date);
        failed.fail();
        let mut done = ReceiptRecord::pending("ok.jpg", date);
        done.complete("合計 2,400");

        let records = [corrected, failed, done];
        let from_records = DeductionSummary::compute(&records, DEFAULT_DEDUCTION_THRESHOLD);
        let from_amounts =
            DeductionSummary::from_amounts(records.iter().map(|r| r.amount), DEFAULT_DEDUCTION_THRESHOLD);

        assert_eq!(from_records.unresolved, 1);
        assert_eq!(from_records, from_amounts);
    }
}
