use std::fmt;

use crate::chunking::model::CaptionChunk;

// @module: SRT export of caption chunks

// @struct: One SubRip cue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtitleEntry {
    // @field: Cue number, starting at 1
    pub seq_num: usize,

    // @field: Cue start in ms
    pub start_time_ms: u64,

    // @field: Cue end in ms
    pub end_time_ms: u64,

    // @field: Caption text
    pub text: String,
}

impl SubtitleEntry {
    pub fn new(seq_num: usize, start_time_ms: u64, end_time_ms: u64, text: String) -> Self {
        Self {
            seq_num,
            start_time_ms,
            end_time_ms,
            text,
        }
    }

    // @creates: Cue for a caption chunk, numbered from its index
    pub fn from_chunk(chunk: &CaptionChunk) -> Self {
        Self::new(chunk.index + 1, chunk.start_ms, chunk.end_ms, chunk.text.clone())
    }

    /// `HH:MM:SS,mmm`; hours keep growing past 99
    pub fn format_timestamp(ms: u64) -> String {
        let (hours, rest) = (ms / 3_600_000, ms % 3_600_000);
        let (minutes, rest) = (rest / 60_000, rest % 60_000);
        let (seconds, millis) = (rest / 1_000, rest % 1_000);

        format!("{:02}:{:02}:{:02},{:03}", hours, minutes, seconds, millis)
    }
}

impl fmt::Display for SubtitleEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\n{} --> {}\n{}\n\n",
            self.seq_num,
            Self::format_timestamp(self.start_time_ms),
            Self::format_timestamp(self.end_time_ms),
            self.text
        )
    }
}

/// Cues for a whole chunk list, in order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubtitleCollection {
    pub entries: Vec<SubtitleEntry>,
}

impl SubtitleCollection {
    /// One cue per chunk
    pub fn from_chunks(chunks: &[CaptionChunk]) -> Self {
        Self {
            entries: chunks.iter().map(SubtitleEntry::from_chunk).collect(),
        }
    }

    /// SubRip text for every cue
    pub fn to_srt_string(&self) -> String {
        self.entries.iter().map(SubtitleEntry::to_string).collect()
    }
}
