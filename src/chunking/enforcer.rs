/*!
 * Final pass: stretch chunks that are still too short to read, without
 * running into the chunk that follows.
 */

use log::debug;

use crate::chunking::config::ChunkingConfig;
use crate::chunking::model::CaptionChunk;
use crate::chunking::timing::required_ms;

/// Extend each chunk's `end_ms` up to its required duration.
///
/// The new end never passes `next.start_ms - chunk_gap_ms`, and a chunk is
/// never shortened. The last chunk is extended without a bound.
pub fn enforce_min_duration(chunks: Vec<CaptionChunk>, config: &ChunkingConfig) -> Vec<CaptionChunk> {
    let next_starts: Vec<Option<u64>> = chunks
        .iter()
        .skip(1)
        .map(|c| Some(c.start_ms))
        .chain(std::iter::once(None))
        .collect();

    let mut extended = 0;
    let result: Vec<CaptionChunk> = chunks
        .into_iter()
        .zip(next_starts)
        .map(|(mut chunk, next_start)| {
            let required = required_ms(chunk.word_count(), chunk.char_count, config);
            if (chunk.duration_ms() as f64) < required {
                let target = chunk.start_ms.saturating_add(required.ceil() as u64);
                let limit = next_start
                    .map_or(target, |start| start.saturating_sub(config.chunk_gap_ms));
                let new_end = target.min(limit).max(chunk.end_ms);
                if new_end > chunk.end_ms {
                    extended += 1;
                    chunk.end_ms = new_end;
                }
            }
            chunk
        })
        .collect();

    debug!("Extended {} of {} chunks to their minimum duration", extended, result.len());

    result
}
