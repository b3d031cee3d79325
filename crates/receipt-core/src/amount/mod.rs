//! Total amount extraction from receipt OCR transcripts.
//!
//! Two strategies run in priority order: a keyword-anchored search for the
//! declared total, then a plausibility-filtered guess over every number in
//! the transcript. The first one that finds a number decides the result.
//!
//! Extraction never fails. A transcript without any usable number yields `0`,
//! which callers must read as "no confident total found" rather than a
//! confirmed free receipt, and surface for manual correction.

pub mod fallback;
pub mod keyword;
mod tokenizer;

pub use tokenizer::tokenize;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Where an extracted amount came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AmountSource {
    /// Largest number on the first line carrying a total keyword.
    Keyword {
        /// Keyword that matched.
        keyword: String,
        /// The matched line, trimmed.
        line: String,
    },
    /// Largest plausible number anywhere in the transcript.
    Fallback {
        /// Number of tokens that passed the plausibility filter.
        candidates: usize,
    },
    /// No strategy produced a number.
    NotFound,
}

/// An extracted amount with its provenance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmountMatch {
    /// Amount in yen.
    pub value: u64,
    /// How the amount was found.
    pub source: AmountSource,
}

impl AmountMatch {
    fn not_found() -> Self {
        Self {
            value: 0,
            source: AmountSource::NotFound,
        }
    }

    /// Whether a strategy produced this amount.
    pub fn is_found(&self) -> bool {
        self.source != AmountSource::NotFound
    }
}

type Strategy = fn(&str) -> Option<AmountMatch>;

/// Strategies in priority order.
const STRATEGIES: [Strategy; 2] = [
    keyword::find_declared_total,
    fallback::find_largest_plausible,
];

/// Extract the believed total of a receipt transcript, in yen.
pub fn extract_amount(transcript: &str) -> u64 {
    explain_amount(transcript).value
}

/// Extract the total together with the strategy that produced it.
pub fn explain_amount(transcript: &str) -> AmountMatch {
    let result = STRATEGIES
        .iter()
        .find_map(|strategy| strategy(transcript))
        .unwrap_or_else(AmountMatch::not_found);

    if !result.is_found() {
        debug!(len = transcript.len(), "no amount found in transcript");
    }

    result
}
