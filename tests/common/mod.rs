/*!
 * Common test utilities for the capchunk test suite
 */

use anyhow::Result;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use capchunk::{CaptionChunk, TimedWord};

/// Vocabulary mixing plain words, punctuation, pivots, numbers and negations
const VOCAB: &[&str] = &[
    "the", "video", "shows", "how", "we", "built", "it", "fast.", "but", "so", "then",
    "really?", "wow!", "$50", "never", "don't", "extraordinary", "a", "I", "wait...", "plus",
    "everything", "10k", "okay,", "because", "insane",
];

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Writes a word list as a JSON word file
pub fn create_word_file(dir: &Path, filename: &str, words: &[TimedWord]) -> Result<PathBuf> {
    let content = serde_json::to_string(words)?;
    create_test_file(dir, filename, &content)
}

/// Builds words from (text, start, end) triples
pub fn words(triples: &[(&str, u64, u64)]) -> Vec<TimedWord> {
    triples.iter()
        .map(|(text, start, end)| TimedWord::new(*text, *start, *end))
        .collect()
}

/// `count` identical words of `word_ms` each, separated by `gap_ms` of silence
pub fn monotone_words(count: usize, word_ms: u64, gap_ms: u64) -> Vec<TimedWord> {
    (0..count as u64)
        .map(|i| {
            let start = i * (word_ms + gap_ms);
            TimedWord::new("word", start, start + word_ms)
        })
        .collect()
}

/// Deterministic pseudo-random, non-overlapping word sequence
pub fn random_words(seed: u64, count: usize) -> Vec<TimedWord> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut cursor = rng.random_range(0..1000u64);

    (0..count)
        .map(|_| {
            let text = VOCAB[rng.random_range(0..VOCAB.len())];
            let duration = rng.random_range(0..600u64);
            let start = cursor;
            let end = start + duration;
            let gap = if rng.random_bool(0.15) {
                rng.random_range(300..1500u64)
            } else {
                rng.random_range(0..250u64)
            };
            cursor = end + gap;
            TimedWord::new(text, start, end)
        })
        .collect()
}

/// Word counts of each chunk
pub fn sizes(chunks: &[CaptionChunk]) -> Vec<usize> {
    chunks.iter().map(|c| c.word_count()).collect()
}

/// Texts of each chunk
pub fn texts(chunks: &[CaptionChunk]) -> Vec<String> {
    chunks.iter().map(|c| c.text.clone()).collect()
}
