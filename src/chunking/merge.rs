/*!
 * Second pass: fuse chunks that cannot stay on screen long enough into a neighbour.
 *
 * A short chunk first absorbs following chunks while it is still short and
 * the pair is mergeable; if that leaves it short, it gets one chance to join
 * the chunk emitted just before it.
 */

use log::debug;

use crate::chunking::config::ChunkingConfig;
use crate::chunking::lexicon::{ends_sentence, ends_strong};
use crate::chunking::model::CaptionChunk;
use crate::chunking::timing::{chars_per_second, duration_met, gap_ms};

/// Whether `chunk` is on screen for less than its required duration
pub fn is_under_duration(chunk: &CaptionChunk, config: &ChunkingConfig) -> bool {
    !duration_met(chunk.duration_ms(), chunk.word_count(), chunk.char_count, config)
}

/// Whether `first` and the chunk right after it may be fused
pub fn can_merge(first: &CaptionChunk, second: &CaptionChunk, config: &ChunkingConfig) -> bool {
    if gap_ms(first.end_ms, second.start_ms) >= config.pause_gap_ms {
        return false;
    }

    if let Some(last) = first.last_word() {
        if ends_sentence(&last.text) || ends_strong(&last.text) {
            return false;
        }
    }

    if first.word_count() + second.word_count() > config.max_words_per_chunk {
        return false;
    }

    let combined_chars = first.char_count + 1 + second.char_count;
    let start_ms = first.start_ms.min(second.start_ms);
    let end_ms = first.end_ms.max(second.end_ms);
    chars_per_second(combined_chars, start_ms, end_ms) <= config.pace_threshold()
}

/// Merge under-duration chunks into their neighbours and renumber the result
pub fn merge_short_chunks(chunks: Vec<CaptionChunk>, config: &ChunkingConfig) -> Vec<CaptionChunk> {
    let input_len = chunks.len();
    let mut merged: Vec<CaptionChunk> = Vec::with_capacity(input_len);
    let mut pending = chunks.into_iter().peekable();

    while let Some(mut current) = pending.next() {
        while is_under_duration(&current, config) {
            match pending.next_if(|next| can_merge(&current, next, config)) {
                Some(next) => current = CaptionChunk::merged(&current, &next),
                None => break,
            }
        }

        let joins_previous = is_under_duration(&current, config)
            && merged
                .last()
                .is_some_and(|previous| can_merge(previous, &current, config));
        if joins_previous {
            if let Some(previous) = merged.pop() {
                current = CaptionChunk::merged(&previous, &current);
            }
        }

        merged.push(current);
    }

    for (index, chunk) in merged.iter_mut().enumerate() {
        chunk.index = index;
    }

    debug!(
        "Merge pass: {} chunks -> {} chunks",
        input_len,
        merged.len()
    );

    merged
}
