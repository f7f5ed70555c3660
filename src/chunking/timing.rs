/*!
 * Reading-speed arithmetic shared by the break rules, the merge pass and the
 * duration enforcer.
 */

use crate::chunking::config::ChunkingConfig;

/// Minimum time a chunk of `words` words and `chars` characters must stay on screen
pub fn required_ms(words: usize, chars: usize, config: &ChunkingConfig) -> f64 {
    let floor = if words <= config.short_chunk_max_words {
        config.min_on_screen_ms_short
    } else {
        config.min_on_screen_ms
    } as f64;
    let by_words = words as f64 / (config.max_words_per_minute / 60_000.0);
    let by_chars = (chars as f64 / config.max_chars_per_second) * 1000.0;

    floor.max(by_words).max(by_chars)
}

/// Whether `duration_ms` covers the required display time
pub fn duration_met(duration_ms: u64, words: usize, chars: usize, config: &ChunkingConfig) -> bool {
    duration_ms as f64 >= required_ms(words, chars, config)
}

/// Span between two instants, floored to 1ms so it can divide safely
pub fn elapsed_ms(start_ms: u64, end_ms: u64) -> u64 {
    end_ms.saturating_sub(start_ms).max(1)
}

/// Characters per second shown over the span `[start_ms, end_ms]`
pub fn chars_per_second(chars: usize, start_ms: u64, end_ms: u64) -> f64 {
    chars as f64 / elapsed_ms(start_ms, end_ms) as f64 * 1000.0
}

/// Silence between the end of one word and the start of the next
pub fn gap_ms(previous_end_ms: u64, next_start_ms: u64) -> u64 {
    next_start_ms.saturating_sub(previous_end_ms)
}
