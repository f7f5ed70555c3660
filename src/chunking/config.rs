/*!
 * Chunking configuration.
 *
 * Every knob has a serde default so partial JSON config files load, and
 * `validate()` rejects combinations that would make the break rules
 * contradict each other.
 */

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::chunking::model::EmphasisType;
use crate::errors::ConfigError;

/// Tuning knobs for caption chunking.
///
/// Supplied once per invocation and never mutated by the engine. Field names
/// serialize in camelCase so config files read like `maxWordsPerChunk`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChunkingConfig {
    /// Hard cap of words per chunk
    #[serde(default = "default_max_words_per_chunk")]
    pub max_words_per_chunk: usize,

    /// Soft floor before pace, sentence and pivot breaks apply
    #[serde(default = "default_min_words_per_chunk")]
    pub min_words_per_chunk: usize,

    /// Word count at which soft hints may close a chunk
    #[serde(default = "default_target_words_per_chunk")]
    pub target_words_per_chunk: usize,

    /// Reading-speed floor, in words per minute
    #[serde(default = "default_max_words_per_minute")]
    pub max_words_per_minute: f64,

    /// Reading-speed cap, in characters per second
    #[serde(default = "default_max_chars_per_second")]
    pub max_chars_per_second: f64,

    /// Minimum display time for chunks of at most `short_chunk_max_words` words
    #[serde(default = "default_min_on_screen_ms_short")]
    pub min_on_screen_ms_short: u64,

    /// Minimum display time for longer chunks
    #[serde(default = "default_min_on_screen_ms")]
    pub min_on_screen_ms: u64,

    /// Boundary between the short and regular minimum display times
    #[serde(default = "default_short_chunk_max_words")]
    pub short_chunk_max_words: usize,

    /// Silence that forces a break
    #[serde(default = "default_pause_gap_ms")]
    pub pause_gap_ms: u64,

    /// Visual gap kept between consecutive chunks when stretching
    #[serde(default = "default_chunk_gap_ms")]
    pub chunk_gap_ms: u64,

    /// Enabled emphasis categories
    #[serde(default = "default_emphasis_types")]
    pub emphasis_types: BTreeSet<EmphasisType>,
}

/// Multiplier applied to `max_chars_per_second` before a pace break fires
pub const PACE_TOLERANCE: f64 = 1.25;

/// Fraction of `pause_gap_ms` that counts as a soft break hint
pub const SOFT_PAUSE_FRACTION: f64 = 0.6;

fn default_max_words_per_chunk() -> usize {
    7
}

fn default_min_words_per_chunk() -> usize {
    2
}

fn default_target_words_per_chunk() -> usize {
    5
}

fn default_max_words_per_minute() -> f64 {
    180.0
}

fn default_max_chars_per_second() -> f64 {
    15.0
}

fn default_min_on_screen_ms_short() -> u64 {
    800
}

fn default_min_on_screen_ms() -> u64 {
    1100
}

fn default_short_chunk_max_words() -> usize {
    2
}

fn default_pause_gap_ms() -> u64 {
    300
}

fn default_chunk_gap_ms() -> u64 {
    80
}

fn default_emphasis_types() -> BTreeSet<EmphasisType> {
    [
        EmphasisType::Number,
        EmphasisType::Power,
        EmphasisType::Negation,
        EmphasisType::Pause,
    ]
    .into_iter()
    .collect()
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            max_words_per_chunk: default_max_words_per_chunk(),
            min_words_per_chunk: default_min_words_per_chunk(),
            target_words_per_chunk: default_target_words_per_chunk(),
            max_words_per_minute: default_max_words_per_minute(),
            max_chars_per_second: default_max_chars_per_second(),
            min_on_screen_ms_short: default_min_on_screen_ms_short(),
            min_on_screen_ms: default_min_on_screen_ms(),
            short_chunk_max_words: default_short_chunk_max_words(),
            pause_gap_ms: default_pause_gap_ms(),
            chunk_gap_ms: default_chunk_gap_ms(),
            emphasis_types: default_emphasis_types(),
        }
    }
}

impl ChunkingConfig {
    /// Check the knobs for consistency
    pub fn validate(&self) -> Result<(), ConfigError> {
        let counts = [
            ("maxWordsPerChunk", self.max_words_per_chunk as u64),
            ("minWordsPerChunk", self.min_words_per_chunk as u64),
            ("targetWordsPerChunk", self.target_words_per_chunk as u64),
            ("pauseGapMs", self.pause_gap_ms),
        ];
        if let Some(&(field, _)) = counts.iter().find(|(_, value)| *value == 0) {
            return Err(ConfigError::ZeroLimit { field });
        }

        let rates = [
            ("maxWordsPerMinute", self.max_words_per_minute),
            ("maxCharsPerSecond", self.max_chars_per_second),
        ];
        for (field, value) in rates {
            if !value.is_finite() {
                return Err(ConfigError::NonFiniteRate { field });
            }
            if value <= 0.0 {
                return Err(ConfigError::ZeroLimit { field });
            }
        }

        if self.min_words_per_chunk > self.max_words_per_chunk {
            return Err(ConfigError::MinExceedsMax {
                min: self.min_words_per_chunk,
                max: self.max_words_per_chunk,
            });
        }

        if self.target_words_per_chunk < self.min_words_per_chunk
            || self.target_words_per_chunk > self.max_words_per_chunk
        {
            return Err(ConfigError::TargetOutOfRange {
                target: self.target_words_per_chunk,
                min: self.min_words_per_chunk,
                max: self.max_words_per_chunk,
            });
        }

        Ok(())
    }

    /// CPS above which pace breaks fire and merges are refused
    pub fn pace_threshold(&self) -> f64 {
        self.max_chars_per_second * PACE_TOLERANCE
    }

    /// Set the word cap, pulling the soft floor and target down to it when they exceed it
    pub fn set_max_words(&mut self, max_words: usize) {
        self.max_words_per_chunk = max_words;
        self.min_words_per_chunk = self.min_words_per_chunk.min(max_words);
        self.target_words_per_chunk = self.target_words_per_chunk.min(max_words);
    }
}
