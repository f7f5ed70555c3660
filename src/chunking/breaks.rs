/*!
 * Break decisions.
 *
 * Before a word is appended to the open chunk, the rules in `BREAK_RULES`
 * are checked in order and the first one that holds closes the chunk.
 * A break that would leave the final word of the input alone on screen is
 * suppressed unless the chunk is already full.
 */

use serde::Serialize;
use std::fmt;

use crate::chunking::config::{ChunkingConfig, SOFT_PAUSE_FRACTION};
use crate::chunking::lexicon::{ends_sentence, ends_strong, is_pivot_word};
use crate::chunking::model::{ChunkedWord, TimedWord, chunk_char_count};
use crate::chunking::timing::{chars_per_second, duration_met, gap_ms};

/// Why a chunk was closed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BreakReason {
    MaxWords,
    PauseGap,
    PaceLimit,
    SentenceEnd,
    Pivot,
    Punch,
    SoftHint,
}

impl BreakReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MaxWords => "max-words",
            Self::PauseGap => "pause-gap",
            Self::PaceLimit => "pace-limit",
            Self::SentenceEnd => "sentence-end",
            Self::Pivot => "pivot",
            Self::Punch => "punch",
            Self::SoftHint => "soft-hint",
        }
    }
}

impl fmt::Display for BreakReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of evaluating the rules for one incoming word
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakDecision {
    /// Append the word to the open chunk
    Continue,
    /// Close the open chunk, then start a new one with the word
    Break(BreakReason),
    /// A rule fired but the word is the last one and gets folded in instead
    Suppressed(BreakReason),
}

impl BreakDecision {
    pub fn should_break(&self) -> bool {
        matches!(self, Self::Break(_))
    }

    /// The rule that fired, whether or not it was suppressed
    pub fn reason(&self) -> Option<BreakReason> {
        match self {
            Self::Continue => None,
            Self::Break(reason) | Self::Suppressed(reason) => Some(*reason),
        }
    }
}

/// Everything the rules look at, computed once per incoming word
struct BreakContext<'a> {
    config: &'a ChunkingConfig,
    word_count: usize,
    char_count: usize,
    start_ms: u64,
    last: &'a ChunkedWord,
    incoming: &'a TimedWord,
    gap_ms: u64,
    duration_met: bool,
}

struct BreakRule {
    reason: BreakReason,
    applies: fn(&BreakContext) -> bool,
}

/// Rules in priority order
const BREAK_RULES: [BreakRule; 7] = [
    BreakRule {
        reason: BreakReason::MaxWords,
        applies: max_words,
    },
    BreakRule {
        reason: BreakReason::PauseGap,
        applies: pause_gap,
    },
    BreakRule {
        reason: BreakReason::PaceLimit,
        applies: pace_limit,
    },
    BreakRule {
        reason: BreakReason::SentenceEnd,
        applies: sentence_end,
    },
    BreakRule {
        reason: BreakReason::Pivot,
        applies: pivot,
    },
    BreakRule {
        reason: BreakReason::Punch,
        applies: punch,
    },
    BreakRule {
        reason: BreakReason::SoftHint,
        applies: soft_hint,
    },
];

fn max_words(ctx: &BreakContext) -> bool {
    ctx.word_count >= ctx.config.max_words_per_chunk
}

fn pause_gap(ctx: &BreakContext) -> bool {
    ctx.gap_ms >= ctx.config.pause_gap_ms
}

fn pace_limit(ctx: &BreakContext) -> bool {
    if ctx.word_count < ctx.config.min_words_per_chunk {
        return false;
    }
    let projected_chars = ctx.char_count + 1 + ctx.incoming.char_len();
    let cps = chars_per_second(projected_chars, ctx.start_ms, ctx.incoming.end_ms);
    cps > ctx.config.pace_threshold()
}

fn sentence_end(ctx: &BreakContext) -> bool {
    ctx.word_count >= ctx.config.min_words_per_chunk && ends_sentence(&ctx.last.text)
}

fn pivot(ctx: &BreakContext) -> bool {
    ctx.duration_met
        && is_pivot_word(&ctx.incoming.text)
        && ctx.word_count >= ctx.config.min_words_per_chunk
}

fn punch(ctx: &BreakContext) -> bool {
    ctx.duration_met
        && (1..=ctx.config.short_chunk_max_words).contains(&ctx.word_count)
        && ends_strong(&ctx.last.text)
}

fn soft_hint(ctx: &BreakContext) -> bool {
    if !ctx.duration_met || ctx.word_count < ctx.config.target_words_per_chunk {
        return false;
    }
    let last = ctx.last.text.as_str();
    ends_strong(last)
        || ends_sentence(last)
        || is_pivot_word(last)
        || ctx.gap_ms as f64 >= SOFT_PAUSE_FRACTION * ctx.config.pause_gap_ms as f64
}

/// Decide whether `incoming` opens a new chunk.
///
/// `current` holds the words of the open chunk; `is_last_word` marks the
/// final word of the whole input.
pub fn decide_break(
    current: &[ChunkedWord],
    incoming: &TimedWord,
    is_last_word: bool,
    config: &ChunkingConfig,
) -> BreakDecision {
    let (Some(first), Some(last)) = (current.first(), current.last()) else {
        return BreakDecision::Continue;
    };

    let word_count = current.len();
    let char_count = chunk_char_count(current.iter().map(|w| w.text.as_str()));
    let ctx = BreakContext {
        config,
        word_count,
        char_count,
        start_ms: first.start_ms,
        last,
        incoming,
        gap_ms: gap_ms(last.end_ms, incoming.start_ms),
        duration_met: duration_met(
            last.end_ms.saturating_sub(first.start_ms),
            word_count,
            char_count,
            config,
        ),
    };

    let Some(rule) = BREAK_RULES.iter().find(|rule| (rule.applies)(&ctx)) else {
        return BreakDecision::Continue;
    };

    if rule.reason != BreakReason::MaxWords
        && is_last_word
        && word_count < config.max_words_per_chunk
    {
        return BreakDecision::Suppressed(rule.reason);
    }

    BreakDecision::Break(rule.reason)
}
