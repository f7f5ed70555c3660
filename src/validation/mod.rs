/*!
 * Validation module for caption chunk output.
 *
 * # Architecture
 *
 * - `chunks`: checks coverage, word caps, timing order and overlap of a
 *   chunk list against the words it was built from
 */

pub mod chunks;

// Re-export main types
pub use chunks::{ChunkIssue, ChunkValidationResult, ChunkValidator};
