/*!
 * Validation of chunker output.
 *
 * This module checks that a chunk list is a faithful captioning of its input:
 * - Every input word appears once, in order
 * - No chunk is empty or above the word cap
 * - Timings are ordered and chunks do not overlap
 * - Indices are contiguous and text matches the words
 *
 * Chunks that end up shorter than their required duration are reported as
 * warnings; they do not fail validation.
 */

use log::debug;

use crate::chunking::config::ChunkingConfig;
use crate::chunking::model::{CaptionChunk, TimedWord};
use crate::chunking::timing::{chars_per_second, required_ms};

/// Result of validating a single chunk
#[derive(Debug, Clone)]
pub struct ChunkEntryResult {
    /// Position of the chunk in the output
    pub position: usize,
    /// Whether the chunk passed validation
    pub passed: bool,
    /// Issues found
    pub issues: Vec<ChunkIssue>,
}

impl ChunkEntryResult {
    /// Create a passing result
    pub fn passed(position: usize) -> Self {
        Self {
            position,
            passed: true,
            issues: vec![],
        }
    }

    /// Create a failing result
    pub fn failed(position: usize, issues: Vec<ChunkIssue>) -> Self {
        Self {
            position,
            passed: false,
            issues,
        }
    }
}

/// Types of chunk issues
#[derive(Debug, Clone, PartialEq)]
pub enum ChunkIssue {
    /// Chunk holds no words
    EmptyChunk,
    /// Chunk is above the word cap
    TooManyWords {
        word_count: usize,
        max_words: usize,
    },
    /// Chunk ends before it starts
    InvertedTiming {
        start_ms: u64,
        end_ms: u64,
    },
    /// Chunk runs into the next one
    Overlap {
        next_position: usize,
        overlap_ms: u64,
    },
    /// Stored index differs from the chunk's position
    IndexGap {
        index: usize,
    },
    /// Stored text differs from the joined words
    TextMismatch {
        expected: String,
        actual: String,
    },
    /// Chunk is shown for less than its required duration (warning)
    UnderDuration {
        duration_ms: u64,
        required_ms: u64,
    },
}

impl ChunkIssue {
    /// Whether this issue fails validation
    pub fn is_failure(&self) -> bool {
        !matches!(self, ChunkIssue::UnderDuration { .. })
    }
}

impl std::fmt::Display for ChunkIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChunkIssue::EmptyChunk => write!(f, "Chunk has no words"),
            ChunkIssue::TooManyWords { word_count, max_words } => {
                write!(f, "Too many words: {} (max: {})", word_count, max_words)
            }
            ChunkIssue::InvertedTiming { start_ms, end_ms } => {
                write!(f, "Invalid time range: start {}ms > end {}ms", start_ms, end_ms)
            }
            ChunkIssue::Overlap { next_position, overlap_ms } => {
                write!(f, "Overlaps chunk {} by {}ms", next_position, overlap_ms)
            }
            ChunkIssue::IndexGap { index } => write!(f, "Unexpected index {}", index),
            ChunkIssue::TextMismatch { expected, actual } => {
                write!(f, "Text '{}' does not match words '{}'", actual, expected)
            }
            ChunkIssue::UnderDuration { duration_ms, required_ms } => {
                write!(
                    f,
                    "Shown for {}ms, needs {}ms to be readable",
                    duration_ms, required_ms
                )
            }
        }
    }
}

/// Result of validating a whole chunk list
#[derive(Debug, Clone)]
pub struct ChunkValidationResult {
    /// Overall pass/fail status
    pub passed: bool,
    /// Whether the chunks cover the input words exactly
    pub coverage_ok: bool,
    /// Results for each chunk
    pub entry_results: Vec<ChunkEntryResult>,
    /// Total number of issues, warnings included
    pub total_issues: usize,
}

impl ChunkValidationResult {
    /// Get all failed chunks
    pub fn failed_entries(&self) -> Vec<&ChunkEntryResult> {
        self.entry_results.iter().filter(|r| !r.passed).collect()
    }
}

/// Validator for chunker output
pub struct ChunkValidator {
    config: ChunkingConfig,
}

impl ChunkValidator {
    /// Create a validator for output produced with `config`
    pub fn new(config: ChunkingConfig) -> Self {
        Self { config }
    }

    /// Validate a single chunk at `position`
    pub fn validate_chunk(&self, position: usize, chunk: &CaptionChunk) -> ChunkEntryResult {
        let mut issues = Vec::new();

        if chunk.words.is_empty() {
            issues.push(ChunkIssue::EmptyChunk);
            return ChunkEntryResult::failed(position, issues);
        }

        if chunk.word_count() > self.config.max_words_per_chunk {
            issues.push(ChunkIssue::TooManyWords {
                word_count: chunk.word_count(),
                max_words: self.config.max_words_per_chunk,
            });
        }

        if chunk.end_ms < chunk.start_ms {
            issues.push(ChunkIssue::InvertedTiming {
                start_ms: chunk.start_ms,
                end_ms: chunk.end_ms,
            });
        }

        if chunk.index != position {
            issues.push(ChunkIssue::IndexGap { index: chunk.index });
        }

        let expected = chunk
            .words
            .iter()
            .map(|w| w.text.trim())
            .collect::<Vec<_>>()
            .join(" ");
        if expected != chunk.text {
            issues.push(ChunkIssue::TextMismatch {
                expected,
                actual: chunk.text.clone(),
            });
        }

        let required = required_ms(chunk.word_count(), chunk.char_count, &self.config);
        if (chunk.duration_ms() as f64) < required {
            issues.push(ChunkIssue::UnderDuration {
                duration_ms: chunk.duration_ms(),
                required_ms: required.ceil() as u64,
            });
        }

        if issues.is_empty() {
            return ChunkEntryResult::passed(position);
        }

        let passed = !issues.iter().any(ChunkIssue::is_failure);
        ChunkEntryResult {
            position,
            passed,
            issues,
        }
    }

    /// Validate `chunks` as the captioning of `words`
    pub fn validate(&self, words: &[TimedWord], chunks: &[CaptionChunk]) -> ChunkValidationResult {
        let mut entry_results: Vec<ChunkEntryResult> = chunks
            .iter()
            .enumerate()
            .map(|(position, chunk)| self.validate_chunk(position, chunk))
            .collect();

        for (position, pair) in chunks.windows(2).enumerate() {
            let (current, next) = (&pair[0], &pair[1]);
            if current.end_ms > next.start_ms {
                if let Some(result) = entry_results.get_mut(position) {
                    result.issues.push(ChunkIssue::Overlap {
                        next_position: position + 1,
                        overlap_ms: current.end_ms - next.start_ms,
                    });
                    result.passed = false;
                }
            }
        }

        let coverage_ok = chunks
            .iter()
            .flat_map(|c| c.words.iter())
            .map(|w| w.to_timed())
            .eq(words.iter().cloned());

        let total_issues: usize = entry_results.iter().map(|r| r.issues.len()).sum();
        let passed = coverage_ok && entry_results.iter().all(|r| r.passed);

        debug!(
            "Chunk validation: {} chunks, {} issues, coverage {}",
            chunks.len(),
            total_issues,
            if coverage_ok { "ok" } else { "broken" }
        );

        ChunkValidationResult {
            passed,
            coverage_ok,
            entry_results,
            total_issues,
        }
    }

    /// Calculate reading speed (characters per second) for a chunk
    pub fn calculate_cps(chunk: &CaptionChunk) -> f64 {
        chars_per_second(chunk.char_count, chunk.start_ms, chunk.end_ms)
    }
}

impl Default for ChunkValidator {
    fn default() -> Self {
        Self::new(ChunkingConfig::default())
    }
}
