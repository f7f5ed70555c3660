/*!
 * Data model shared by every chunking pass.
 *
 * Words come in as `TimedWord`, get tagged with emphasis metadata to become
 * `ChunkedWord`, and leave grouped into `CaptionChunk`s.
 */

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single spoken word with its alignment timestamps
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimedWord {
    /// Word as spoken, possibly carrying punctuation
    pub text: String,

    /// Start of the word in ms
    pub start_ms: u64,

    /// End of the word in ms
    pub end_ms: u64,
}

impl TimedWord {
    /// Create a new timed word
    pub fn new(text: impl Into<String>, start_ms: u64, end_ms: u64) -> Self {
        Self {
            text: text.into(),
            start_ms,
            end_ms,
        }
    }

    /// Visible characters of the word once surrounding whitespace is dropped
    pub fn char_len(&self) -> usize {
        self.text.trim().chars().count()
    }
}

/// Category of emphasis a word can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmphasisType {
    /// Numbers, prices, percentages, hashtags of digits
    Number,
    /// Closed-set negations ("never", "don't")
    Negation,
    /// Curated high-impact vocabulary
    Power,
    /// Word right before a `!` or `?`
    Punctuation,
    /// Word followed by a long silence
    Pause,
}

impl EmphasisType {
    /// Every category, in classifier priority order
    pub const ALL: [EmphasisType; 5] = [
        EmphasisType::Number,
        EmphasisType::Negation,
        EmphasisType::Power,
        EmphasisType::Punctuation,
        EmphasisType::Pause,
    ];

    /// Lowercase identifier used in config files and on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::Negation => "negation",
            Self::Power => "power",
            Self::Punctuation => "punctuation",
            Self::Pause => "pause",
        }
    }
}

impl fmt::Display for EmphasisType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for EmphasisType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "number" => Ok(Self::Number),
            "negation" => Ok(Self::Negation),
            "power" => Ok(Self::Power),
            "punctuation" => Ok(Self::Punctuation),
            "pause" => Ok(Self::Pause),
            _ => Err(anyhow::anyhow!("Invalid emphasis type: {}", s)),
        }
    }
}

/// Outcome of classifying a single word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Emphasis {
    pub is_emphasized: bool,
    pub emphasis_type: Option<EmphasisType>,
}

impl Emphasis {
    /// No emphasis
    pub const NONE: Emphasis = Emphasis {
        is_emphasized: false,
        emphasis_type: None,
    };

    /// Emphasis of the given category
    pub fn of(emphasis_type: EmphasisType) -> Self {
        Self {
            is_emphasized: true,
            emphasis_type: Some(emphasis_type),
        }
    }
}

/// A word placed in a chunk, with its emphasis metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChunkedWord {
    pub text: String,
    pub start_ms: u64,
    pub end_ms: u64,
    pub is_emphasized: bool,
    pub emphasis_type: Option<EmphasisType>,
}

impl ChunkedWord {
    /// Tag a timed word with its classification
    pub fn new(word: &TimedWord, emphasis: Emphasis) -> Self {
        Self {
            text: word.text.clone(),
            start_ms: word.start_ms,
            end_ms: word.end_ms,
            is_emphasized: emphasis.is_emphasized,
            emphasis_type: emphasis.emphasis_type,
        }
    }

    /// The timing-only view of this word
    pub fn to_timed(&self) -> TimedWord {
        TimedWord::new(self.text.clone(), self.start_ms, self.end_ms)
    }
}

/// One on-screen caption group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptionChunk {
    pub words: Vec<ChunkedWord>,
    pub text: String,
    pub start_ms: u64,
    pub end_ms: u64,
    pub char_count: usize,
    pub index: usize,
    pub has_emphasis: bool,
}

impl CaptionChunk {
    /// Build a chunk from its words. `words` must be non-empty.
    pub fn from_words(words: Vec<ChunkedWord>, index: usize) -> Self {
        debug_assert!(!words.is_empty(), "caption chunk needs at least one word");

        let text = words
            .iter()
            .map(|w| w.text.trim())
            .collect::<Vec<_>>()
            .join(" ");
        let char_count = chunk_char_count(words.iter().map(|w| w.text.as_str()));
        let start_ms = words.first().map_or(0, |w| w.start_ms);
        let end_ms = words.last().map_or(start_ms, |w| w.end_ms);
        let has_emphasis = words.iter().any(|w| w.is_emphasized);

        Self {
            words,
            text,
            start_ms,
            end_ms,
            char_count,
            index,
            has_emphasis,
        }
    }

    /// Concatenate two neighbouring chunks into a new one.
    ///
    /// Keeps the earliest start and the latest end of the pair, and the
    /// index of `first`.
    pub fn merged(first: &CaptionChunk, second: &CaptionChunk) -> Self {
        let words = first
            .words
            .iter()
            .chain(second.words.iter())
            .cloned()
            .collect();
        let mut chunk = Self::from_words(words, first.index);
        chunk.start_ms = first.start_ms.min(second.start_ms);
        chunk.end_ms = first.end_ms.max(second.end_ms);
        chunk
    }

    /// Number of words in the chunk
    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    /// On-screen duration in ms
    pub fn duration_ms(&self) -> u64 {
        self.end_ms.saturating_sub(self.start_ms)
    }

    /// Last word of the chunk
    pub fn last_word(&self) -> Option<&ChunkedWord> {
        self.words.last()
    }
}

impl fmt::Display for CaptionChunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} [{}ms-{}ms] {}",
            self.index, self.start_ms, self.end_ms, self.text
        )
    }
}

/// Displayed length of a run of words: trimmed characters plus one space between words
pub fn chunk_char_count<'a>(words: impl IntoIterator<Item = &'a str>) -> usize {
    let mut count: usize = 0;
    let mut letters: usize = 0;
    for word in words {
        count += 1;
        letters += word.trim().chars().count();
    }
    letters + count.saturating_sub(1)
}
