/*!
 * # capchunk - Caption chunking for short-form video
 *
 * A Rust library that turns time-aligned spoken words into short on-screen
 * caption groups sized and timed for fast-paced video.
 *
 * ## Features
 *
 * - Priority-ordered break rules: word caps, pauses, reading pace,
 *   sentence ends, discourse pivots, punchy exclamations, soft hints
 * - Emphasis tagging for numbers, negations, power words, punctuation and pauses
 * - Merge pass that fuses unreadably short chunks into neighbours
 * - Minimum on-screen duration enforcement without overlapping chunks
 * - JSON and SRT output
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `chunking`: the chunking engine:
 *   - `chunking::emphasis`: Emphasis classification
 *   - `chunking::breaks`: Break decision rules
 *   - `chunking::accumulator`: First pass building raw chunks
 *   - `chunking::merge`: Short-chunk merge pass
 *   - `chunking::enforcer`: Minimum on-screen duration enforcement
 * - `validation`: Checks chunk output against its input
 * - `subtitle_processor`: SRT rendering of chunks
 * - `app_config`: Configuration management
 * - `app_controller`: File and directory processing
 * - `file_utils`: File system operations
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod chunking;
pub mod errors;
pub mod file_utils;
pub mod subtitle_processor;
pub mod validation;

// Re-export main types for easier usage
pub use app_config::Config;
pub use chunking::{
    CaptionChunk, CaptionChunker, ChunkedWord, ChunkingConfig, EmphasisType, TimedWord,
    chunk_words, validate_words,
};
pub use errors::{AppError, ConfigError, InputError};
pub use validation::ChunkValidator;
