//! Keyword-anchored total detection.

use tracing::debug;

use super::tokenizer::tokenize;
use super::{AmountMatch, AmountSource};

/// Labels that mark the declared total on Japanese receipts, in priority order.
pub const TOTAL_KEYWORDS: [&str; 5] = ["合計", "請求金額", "領収金額", "お預り", "対象額"];

/// Find the first line carrying a total keyword and at least one number.
///
/// The largest number on that line wins, so `合計 1,200 (税 100)` yields 1200.
/// Keyword lines without numbers are skipped.
pub fn find_declared_total(transcript: &str) -> Option<AmountMatch> {
    transcript
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .find_map(|line| {
            let keyword = TOTAL_KEYWORDS.iter().copied().find(|k| line.contains(k))?;
            let value = tokenize(line).into_iter().max()?;

            debug!(keyword, value, "matched total keyword line");
            Some(AmountMatch {
                value,
                source: AmountSource::Keyword {
                    keyword: keyword.to_string(),
                    line: line.to_string(),
                },
            })
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn value(text: &str) -> Option<u64> {
        find_declared_total(text).map(|m| m.value)
    }

    #[test]
    fn test_keyword_line_wins_over_other_lines() {
        assert_eq!(value("お釣り 500\n合計 1,200\n消費税 100"), Some(1200));
    }

    #[test]
    fn test_max_on_matched_line() {
        assert_eq!(value("合計 1,200 (税 100)"), Some(1200));
        assert_eq!(value("合計 100 (内 1,200)"), Some(1200));
    }

    #[test]
    fn test_first_matching_line_wins() {
        let text = "小計 3,000\n請求金額 2,800\n合計 9,999";
        assert_eq!(value(text), Some(2800));
    }

    #[test]
    fn test_keyword_without_number_is_skipped() {
        let text = "合計\n¥ 3,000\n領収金額 2,980";
        assert_eq!(value(text), Some(2980));
    }

    #[test]
    fn test_reports_first_keyword_in_declared_order() {
        let hit = find_declared_total("お預り合計 5,000").unwrap();
        assert_eq!(
            hit.source,
            AmountSource::Keyword {
                keyword: "合計".to_string(),
                line: "お預り合計 5,000".to_string(),
            }
        );
    }

    #[test]
    fn test_line_is_trimmed() {
        let hit = find_declared_total("  \r\n\t対象額 1,500 \r\n").unwrap();
        assert_eq!(hit.value, 1500);
        assert!(matches!(hit.source, AmountSource::Keyword { ref line, .. } if line == "対象額 1,500"));
    }

    #[test]
    fn test_small_values_are_not_filtered() {
        assert_eq!(value("合計 5"), Some(5));
        assert_eq!(value("合計 0"), Some(0));
    }

    #[test]
    fn test_keyword_line_with_overflowing_number_is_skipped() {
        assert_eq!(value("合計 99999999999999999999999"), None);
        assert_eq!(value("合計 99999999999999999999999\n請求金額 1,500"), Some(1500));
    }

    #[test]
    fn test_no_keyword() {
        assert_eq!(value("金額 2500"), None);
        assert_eq!(value(""), None);
    }
}
