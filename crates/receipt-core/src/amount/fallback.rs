//! Plausibility-filtered fallback when no total keyword is present.

use tracing::debug;

use super::tokenizer::tokenize;
use super::{AmountMatch, AmountSource};

/// Values at or below this are treated as counts, page numbers and similar noise.
pub const MIN_PLAUSIBLE_EXCLUSIVE: u64 = 10;

/// Values at or above this are treated as phone numbers, IDs and similar noise.
pub const MAX_PLAUSIBLE_EXCLUSIVE: u64 = 10_000_000;

/// Whether `value` lies in the range of a plausible receipt total.
pub fn is_plausible(value: u64) -> bool {
    value > MIN_PLAUSIBLE_EXCLUSIVE && value < MAX_PLAUSIBLE_EXCLUSIVE
}

/// Pick the largest plausible number anywhere in the transcript.
///
/// Phone number fragments survive the filter, so `03-1234-5678` can outrank
/// the real amount.
pub fn find_largest_plausible(transcript: &str) -> Option<AmountMatch> {
    let candidates: Vec<u64> = tokenize(transcript)
        .into_iter()
        .filter(|v| is_plausible(*v))
        .collect();

    let value = candidates.iter().copied().max()?;

    debug!(value, candidates = candidates.len(), "fell back to largest plausible number");
    Some(AmountMatch {
        value,
        source: AmountSource::Fallback {
            candidates: candidates.len(),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_bounds_are_exclusive() {
        assert!(!is_plausible(10));
        assert!(is_plausible(11));
        assert!(is_plausible(9_999_999));
        assert!(!is_plausible(10_000_000));
    }

    #[test]
    fn test_phone_fragment_outranks_amount() {
        let hit = find_largest_plausible("電話 03-1234-5678 購入数 3 金額 2500").unwrap();
        assert_eq!(hit.value, 5678);
        assert_eq!(hit.source, AmountSource::Fallback { candidates: 3 });
    }

    #[test]
    fn test_spans_lines() {
        let hit = find_largest_plausible("診療費\n1,980\n薬剤\n420").unwrap();
        assert_eq!(hit.value, 1980);
    }

    #[test]
    fn test_only_noise() {
        assert_eq!(find_largest_plausible("1 2 3 10"), None);
        assert_eq!(find_largest_plausible("0312345678"), None);
        assert_eq!(find_largest_plausible("ありがとうございました"), None);
    }
}
