/*!
 * Tests for SRT rendering of caption chunks
 */

use capchunk::chunking::CaptionChunker;
use capchunk::subtitle_processor::{SubtitleCollection, SubtitleEntry};
use crate::common::{self, words};

/// Test timestamp formatting
#[test]
fn test_format_timestamp_withVariousTimes_shouldFormatCorrectly() {
    assert_eq!(SubtitleEntry::format_timestamp(0), "00:00:00,000");
    assert_eq!(SubtitleEntry::format_timestamp(670), "00:00:00,670");
    assert_eq!(SubtitleEntry::format_timestamp(61_001), "00:01:01,001");
    assert_eq!(SubtitleEntry::format_timestamp(3_723_004), "01:02:03,004");
}

/// Each chunk becomes one cue numbered from 1
#[test]
fn test_from_chunks_shouldNumberCuesFromOne() {
    let input = words(&[
        ("Wait.", 0, 400),
        ("But", 750, 1050),
        ("then", 1050, 1350),
        ("it", 1350, 1600),
        ("worked", 1600, 2000),
        ("completely", 2000, 2600),
    ]);
    let chunks = CaptionChunker::default().chunk(&input);

    let collection = SubtitleCollection::from_chunks(&chunks);

    assert_eq!(collection.entries.len(), 2);
    assert_eq!(
        collection.entries[0],
        SubtitleEntry::new(1, 0, 670, "Wait.".to_string())
    );
    assert_eq!(collection.entries[1].seq_num, 2);
    assert_eq!(collection.entries[1].text, "But then it worked completely");
}

/// Cues render in SubRip layout separated by blank lines
#[test]
fn test_to_srt_string_shouldRenderSubRipBlocks() {
    let chunks = CaptionChunker::default().chunk(&words(&[("Go", 0, 250)]));
    let collection = SubtitleCollection::from_chunks(&chunks);

    assert_eq!(
        collection.to_srt_string(),
        "1\n00:00:00,000 --> 00:00:00,800\nGo\n\n"
    );
}

/// Every cue timing line carries the chunk's own times
#[test]
fn test_srt_timestamps_shouldMatchChunkTimes() {
    let chunks = CaptionChunker::default().chunk(&common::monotone_words(20, 400, 0));
    let srt = SubtitleCollection::from_chunks(&chunks).to_srt_string();

    let timing_lines: Vec<&str> = srt.lines().filter(|line| line.contains(" --> ")).collect();

    assert_eq!(timing_lines.len(), chunks.len());
    for (line, chunk) in timing_lines.iter().zip(&chunks) {
        let expected = format!(
            "{} --> {}",
            SubtitleEntry::format_timestamp(chunk.start_ms),
            SubtitleEntry::format_timestamp(chunk.end_ms)
        );
        assert_eq!(*line, expected);
    }
}
