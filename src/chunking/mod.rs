/*!
 * Caption chunking engine.
 *
 * Turns a flat, time-aligned list of spoken words into short caption groups
 * sized and timed for fast-paced video. The pipeline is three pure passes:
 *
 * - `accumulator`: one left-to-right pass cutting words into raw chunks,
 *   using `breaks` for the cut decisions and `emphasis` to tag words
 * - `merge`: fuses chunks that are too short to read into a neighbour
 * - `enforcer`: stretches whatever is still too short, up to the next chunk
 *
 * Supporting modules:
 * - `model`: words and chunks
 * - `config`: tuning knobs and their validation
 * - `lexicon`: closed word sets and punctuation predicates
 * - `timing`: reading-speed arithmetic
 */

pub mod accumulator;
pub mod breaks;
pub mod config;
pub mod emphasis;
pub mod enforcer;
pub mod lexicon;
pub mod merge;
pub mod model;
pub mod timing;

use log::{debug, warn};

pub use accumulator::{Accumulation, accumulate, accumulate_traced};
pub use breaks::{BreakDecision, BreakReason, decide_break};
pub use config::ChunkingConfig;
pub use emphasis::classify_emphasis;
pub use enforcer::enforce_min_duration;
pub use merge::merge_short_chunks;
pub use model::{CaptionChunk, ChunkedWord, Emphasis, EmphasisType, TimedWord};

use crate::errors::{ConfigError, InputError};

/// Chunks words with a configuration validated up front
#[derive(Debug, Clone)]
pub struct CaptionChunker {
    config: ChunkingConfig,
}

impl CaptionChunker {
    /// Create a chunker, rejecting inconsistent configurations
    pub fn new(config: ChunkingConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Configuration in use
    pub fn config(&self) -> &ChunkingConfig {
        &self.config
    }

    /// Run the full pipeline over `words`
    pub fn chunk(&self, words: &[TimedWord]) -> Vec<CaptionChunk> {
        self.chunk_with_trace(words).0
    }

    /// Run the full pipeline, also returning the rule behind each raw break
    pub fn chunk_with_trace(&self, words: &[TimedWord]) -> (Vec<CaptionChunk>, Vec<BreakReason>) {
        if words.is_empty() {
            return (Vec::new(), Vec::new());
        }

        let Accumulation { chunks, breaks } = accumulate_traced(words, &self.config);
        let merged = merge_short_chunks(chunks, &self.config);
        let finished = enforce_min_duration(merged, &self.config);

        debug!(
            "Chunked {} words into {} captions",
            words.len(),
            finished.len()
        );

        (finished, breaks)
    }
}

impl Default for CaptionChunker {
    fn default() -> Self {
        Self {
            config: ChunkingConfig::default(),
        }
    }
}

/// Validate `config` and chunk `words` in one call
pub fn chunk_words(
    words: &[TimedWord],
    config: &ChunkingConfig,
) -> Result<Vec<CaptionChunk>, ConfigError> {
    Ok(CaptionChunker::new(config.clone())?.chunk(words))
}

/// Check that words are well formed: non-inverted, non-overlapping spans in order, with visible text.
///
/// The engine accepts any input; this is for callers that want to reject
/// suspicious aligner output before chunking it.
pub fn validate_words(words: &[TimedWord]) -> Result<(), InputError> {
    let mut previous: Option<&TimedWord> = None;

    for (index, word) in words.iter().enumerate() {
        if word.text.trim().is_empty() {
            warn!("Word {} has no text", index);
            return Err(InputError::EmptyText { index });
        }

        if word.end_ms < word.start_ms {
            warn!("Word {} ('{}') ends before it starts", index, word.text);
            return Err(InputError::InvertedWord {
                index,
                start_ms: word.start_ms,
                end_ms: word.end_ms,
            });
        }

        if let Some(previous) = previous {
            if word.start_ms < previous.start_ms {
                warn!("Word {} ('{}') is out of order", index, word.text);
                return Err(InputError::OutOfOrder {
                    index,
                    start_ms: word.start_ms,
                    previous_start_ms: previous.start_ms,
                });
            }
            if word.start_ms < previous.end_ms {
                warn!("Word {} ('{}') overlaps '{}'", index, word.text, previous.text);
                return Err(InputError::OverlappingWord {
                    index,
                    start_ms: word.start_ms,
                    previous_end_ms: previous.end_ms,
                });
            }
        }
        previous = Some(word);
    }

    Ok(())
}
