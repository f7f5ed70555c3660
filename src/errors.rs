/*!
 * Error types for the capchunk application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors raised when a chunking configuration is internally inconsistent
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A limit that must be positive was set to zero
    #[error("Configuration value '{field}' must be greater than zero")]
    ZeroLimit {
        /// Name of the offending option
        field: &'static str,
    },

    /// The soft word floor is above the hard word cap
    #[error("minWordsPerChunk ({min}) exceeds maxWordsPerChunk ({max})")]
    MinExceedsMax {
        min: usize,
        max: usize,
    },

    /// The soft-break target lies outside [min, max]
    #[error("targetWordsPerChunk ({target}) must lie between minWordsPerChunk ({min}) and maxWordsPerChunk ({max})")]
    TargetOutOfRange {
        target: usize,
        min: usize,
        max: usize,
    },

    /// A rate option is NaN or infinite
    #[error("Configuration value '{field}' must be a finite number")]
    NonFiniteRate {
        /// Name of the offending option
        field: &'static str,
    },
}

/// Errors describing malformed word input
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputError {
    /// Word ends before it starts
    #[error("Word {index} ends before it starts ({start_ms}ms -> {end_ms}ms)")]
    InvertedWord {
        index: usize,
        start_ms: u64,
        end_ms: u64,
    },

    /// Word starts before its predecessor
    #[error("Word {index} starts at {start_ms}ms, before the previous word at {previous_start_ms}ms")]
    OutOfOrder {
        index: usize,
        start_ms: u64,
        previous_start_ms: u64,
    },

    /// Word starts before its predecessor has finished
    #[error("Word {index} starts at {start_ms}ms, before the previous word ends at {previous_end_ms}ms")]
    OverlappingWord {
        index: usize,
        start_ms: u64,
        previous_end_ms: u64,
    },

    /// Word has no visible text
    #[error("Word {index} has empty text")]
    EmptyText {
        index: usize,
    },
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Invalid chunking configuration
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Invalid word input
    #[error("Input error: {0}")]
    Input(#[from] InputError),

    /// Malformed JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
