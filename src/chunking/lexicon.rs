/*!
 * Closed vocabularies and punctuation predicates used by the classifier
 * and the break rules.
 *
 * The word sets are process-wide constants built on first use.
 */

use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Punctuation stripped from both ends of a word before lexicon lookups
const STRIP_CHARS: &[char] = &['.', ',', '!', '?', ';', ':', '"'];

/// Negations recognised by the classifier
pub const NEGATION_WORDS: &[&str] = &[
    "don't", "can't", "won't", "shouldn't", "couldn't", "wouldn't", "not", "no", "never", "none",
];

/// Curated high-impact vocabulary
pub const POWER_WORDS: &[&str] = &[
    // superlatives
    "best", "worst", "biggest", "greatest", "fastest", "most", "least",
    // absolutes
    "always", "every", "everything", "everyone", "nothing", "nobody", "only", "ever", "forever",
    "absolutely", "completely", "totally", "literally",
    // drama
    "insane", "crazy", "shocking", "incredible", "unbelievable", "secret", "huge", "massive",
    "instantly", "stop", "mistake", "warning",
    // business
    "free", "money", "profit", "revenue", "growth", "million", "billion", "guaranteed",
];

/// Discourse connectors that make natural phrase boundaries
pub const PIVOT_WORDS: &[&str] = &[
    "but", "so", "because", "then", "however", "instead", "therefore", "meanwhile", "yet", "also",
    "plus",
];

static NEGATIONS: Lazy<HashSet<&'static str>> =
    Lazy::new(|| NEGATION_WORDS.iter().copied().collect());

// Negations double as power words so they still light up when only the
// power category is enabled.
static POWER: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    POWER_WORDS
        .iter()
        .chain(NEGATION_WORDS.iter())
        .copied()
        .collect()
});

static PIVOTS: Lazy<HashSet<&'static str>> = Lazy::new(|| PIVOT_WORDS.iter().copied().collect());

/// Lowercase a word, unify apostrophes and strip surrounding punctuation
pub fn normalize_word(text: &str) -> String {
    text.trim()
        .to_lowercase()
        .replace(['\u{2019}', '\u{2018}'], "'")
        .trim_matches(STRIP_CHARS)
        .to_string()
}

/// Whether the normalized word is a negation
pub fn is_negation(normalized: &str) -> bool {
    NEGATIONS.contains(normalized)
}

/// Whether the normalized word is in the power lexicon
pub fn is_power_word(normalized: &str) -> bool {
    POWER.contains(normalized)
}

/// Whether a raw word is a discourse pivot
pub fn is_pivot_word(text: &str) -> bool {
    PIVOTS.contains(normalize_word(text).as_str())
}

/// Ends with `.`, `!` or `?`, but is not trailing off with an ellipsis
pub fn ends_sentence(text: &str) -> bool {
    let text = text.trim_end();
    if text.ends_with("...") || text.ends_with('\u{2026}') {
        return false;
    }
    text.ends_with(['.', '!', '?'])
}

/// Ends with an exclamation or question mark
pub fn ends_strong(text: &str) -> bool {
    text.trim_end().ends_with(['!', '?'])
}
