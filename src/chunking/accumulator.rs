/*!
 * First pass: walk the words left to right and cut them into raw chunks.
 */

use log::{debug, trace};

use crate::chunking::breaks::{BreakDecision, BreakReason, decide_break};
use crate::chunking::config::ChunkingConfig;
use crate::chunking::emphasis::classify_emphasis;
use crate::chunking::lexicon::ends_strong;
use crate::chunking::model::{CaptionChunk, ChunkedWord, TimedWord};
use crate::chunking::timing::gap_ms;

/// Raw chunks plus the rule that closed each one but the last
#[derive(Debug, Clone, Default)]
pub struct Accumulation {
    pub chunks: Vec<CaptionChunk>,
    /// `breaks[i]` is the reason chunk `i` was closed before chunk `i + 1`
    pub breaks: Vec<BreakReason>,
}

/// Build the raw chunks
pub fn accumulate(words: &[TimedWord], config: &ChunkingConfig) -> Vec<CaptionChunk> {
    accumulate_traced(words, config).chunks
}

/// Build the raw chunks, recording why each break happened
pub fn accumulate_traced(words: &[TimedWord], config: &ChunkingConfig) -> Accumulation {
    let mut result = Accumulation::default();
    let mut current: Vec<ChunkedWord> = Vec::new();

    for (i, word) in words.iter().enumerate() {
        let next = words.get(i + 1);
        let is_before_pause =
            next.is_some_and(|n| gap_ms(word.end_ms, n.start_ms) >= config.pause_gap_ms);
        let emphasis = classify_emphasis(
            &word.text,
            is_before_pause,
            ends_strong(&word.text),
            &config.emphasis_types,
        );

        let decision = decide_break(&current, word, next.is_none(), config);
        match decision {
            BreakDecision::Break(reason) => {
                trace!("Break before '{}' ({})", word.text, reason);
                let index = result.chunks.len();
                result
                    .chunks
                    .push(CaptionChunk::from_words(std::mem::take(&mut current), index));
                result.breaks.push(reason);
            }
            BreakDecision::Suppressed(reason) => {
                trace!("Folding final word '{}' into open chunk ({} suppressed)", word.text, reason);
            }
            BreakDecision::Continue => {}
        }

        current.push(ChunkedWord::new(word, emphasis));
    }

    if !current.is_empty() {
        let index = result.chunks.len();
        result.chunks.push(CaptionChunk::from_words(current, index));
    }

    debug!(
        "Accumulated {} words into {} raw chunks",
        words.len(),
        result.chunks.len()
    );

    result
}
