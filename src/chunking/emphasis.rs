/*!
 * Emphasis classification.
 *
 * Tags a word with at most one emphasis category. Categories are checked in
 * the order of `EmphasisType::ALL` and the first enabled match wins:
 * number, negation, power, punctuation, pause.
 */

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;

use crate::chunking::lexicon::{is_negation, is_power_word, normalize_word};
use crate::chunking::model::{Emphasis, EmphasisType};

// Prices and magnitudes ($50, 10k, 3m), decimal percentages (2.5%), and #1 style ranks
static NUMBER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:[$€£¥]?\d+(?:,\d{3})*[%kmb]?|\d+\.\d+%|#\d+)$").unwrap()
});

/// Whether a normalized word looks like a numeric token
pub fn is_numeric_token(normalized: &str) -> bool {
    NUMBER_REGEX.is_match(normalized)
}

/// Classify a single word.
///
/// `is_before_pause` is true when the silence after the word reaches the
/// pause gap; `is_before_punctuation` when the word carries a trailing `!` or `?`.
pub fn classify_emphasis(
    word: &str,
    is_before_pause: bool,
    is_before_punctuation: bool,
    enabled: &BTreeSet<EmphasisType>,
) -> Emphasis {
    let normalized = normalize_word(word);

    EmphasisType::ALL
        .into_iter()
        .filter(|kind| enabled.contains(kind))
        .find(|kind| match kind {
            EmphasisType::Number => is_numeric_token(&normalized),
            EmphasisType::Negation => is_negation(&normalized),
            EmphasisType::Power => is_power_word(&normalized),
            EmphasisType::Punctuation => is_before_punctuation,
            EmphasisType::Pause => is_before_pause,
        })
        .map(Emphasis::of)
        .unwrap_or(Emphasis::NONE)
}
