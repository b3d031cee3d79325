//! Numeric token extraction from OCR text.

use lazy_static::lazy_static;
use regex::Regex;
use tracing::trace;

lazy_static! {
    // Thousands-grouped amount anchored at a digit run start: 1,234 or 12,345,678
    static ref GROUPED_RUN: Regex = Regex::new(r"^[0-9]{1,3}(?:,[0-9]{3})+").unwrap();

    // Plain digit run anchored at a digit run start: 1234
    static ref PLAIN_RUN: Regex = Regex::new(r"^[0-9]+").unwrap();
}

/// Extract every number from `text`, in order of appearance.
///
/// A comma-grouped run (`1,234,567`) is read as one number when the grouping
/// is well formed and the run does not continue with another digit. Anything
/// else is read as plain digit runs, so `12,34` yields `[12, 34]`.
/// Values that do not fit in a `u64` are dropped.
pub fn tokenize(text: &str) -> Vec<u64> {
    let mut tokens = Vec::new();
    let mut pos = 0;

    while let Some(offset) = text[pos..].find(|c: char| c.is_ascii_digit()) {
        let start = pos + offset;
        let run = match_run(&text[start..]);
        pos = start + run.len();

        match normalize(run) {
            Some(value) => tokens.push(value),
            None => trace!("dropping unparsable numeric token {:?}", run),
        }
    }

    tokens
}

/// Match the number starting at the beginning of `rest`, which must start
/// with an ASCII digit.
fn match_run(rest: &str) -> &str {
    if let Some(m) = GROUPED_RUN.find(rest) {
        let continues = rest[m.end()..].starts_with(|c: char| c.is_ascii_digit());
        if !continues {
            return m.as_str();
        }
    }

    PLAIN_RUN
        .find(rest)
        .map_or(&rest[..1], |m| m.as_str())
}

fn normalize(run: &str) -> Option<u64> {
    let digits: String = run.chars().filter(|c| *c != ',').collect();
    digits.parse().ok()
}
