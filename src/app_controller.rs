use anyhow::{Result, Context, anyhow};
use log::{error, warn, info, debug};
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::app_config::{Config, OutputFormat};
use crate::chunking::{CaptionChunk, CaptionChunker, TimedWord, validate_words};
use crate::file_utils::FileManager;
use crate::subtitle_processor::SubtitleCollection;
use crate::validation::ChunkValidator;

// @module: Application controller for caption chunking

/// What happened to a single word file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Captions were written to this path
    Written(PathBuf),
    /// Output already existed and overwrite was not forced
    Skipped(PathBuf),
}

/// Totals for a directory run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FolderSummary {
    pub processed: usize,
    pub skipped: usize,
    /// JSON files that are not word lists, such as config files
    pub ignored: usize,
    pub failed: usize,
}

/// Main application controller for caption chunking
pub struct Controller {
    // @field: App configuration
    config: Config,

    // @field: Chunker built from the validated configuration
    chunker: CaptionChunker,

    // @field: Validate output before writing it
    check_output: bool,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate()?;
        let chunker = CaptionChunker::new(config.chunking.clone())
            .context("Failed to create caption chunker")?;

        Ok(Self {
            config,
            chunker,
            check_output: false,
        })
    }

    // @method: Enable or disable output validation
    pub fn with_output_check(mut self, check_output: bool) -> Self {
        self.check_output = check_output;
        self
    }

    /// Configuration in use
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Chunk a word list, rejecting malformed input and, when enabled, invalid output
    pub fn chunk_words(&self, words: &[TimedWord]) -> Result<Vec<CaptionChunk>> {
        validate_words(words)?;

        let (chunks, breaks) = self.chunker.chunk_with_trace(words);
        debug!(
            "Raw breaks: {}",
            breaks
                .iter()
                .map(|reason| reason.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );

        if self.check_output {
            let validator = ChunkValidator::new(self.config.chunking.clone());
            let result = validator.validate(words, &chunks);
            for entry in &result.entry_results {
                for issue in &entry.issues {
                    warn!("Chunk {}: {}", entry.position, issue);
                }
            }
            if !result.coverage_ok {
                warn!("Chunks do not cover the input words exactly");
            }
            if !result.passed {
                return Err(anyhow!(
                    "Chunk validation failed with {} issue(s)",
                    result.total_issues
                ));
            }
        }

        Ok(chunks)
    }

    /// Render chunks in the configured output format
    pub fn render(&self, chunks: &[CaptionChunk]) -> Result<String> {
        match self.config.output.format {
            OutputFormat::Json => {
                let rendered = if self.config.output.pretty {
                    serde_json::to_string_pretty(chunks)
                } else {
                    serde_json::to_string(chunks)
                };
                rendered.context("Failed to serialize chunks to JSON")
            }
            OutputFormat::Srt => {
                Ok(SubtitleCollection::from_chunks(chunks).to_srt_string())
            }
        }
    }

    /// Chunk one word file into `output_dir`
    pub fn run(&self, input_file: PathBuf, output_dir: PathBuf, force_overwrite: bool) -> Result<RunOutcome> {
        let start_time = Instant::now();

        if !FileManager::file_exists(&input_file) {
            return Err(anyhow!("Input file does not exist: {:?}", input_file));
        }

        FileManager::ensure_dir(&output_dir)?;

        let output_path = FileManager::generate_output_path(
            &input_file,
            &output_dir,
            self.config.output.format.extension(),
        );
        if output_path.exists() && !force_overwrite {
            warn!("Skipping {:?}, captions already exist (use -f to force overwrite)", input_file);
            return Ok(RunOutcome::Skipped(output_path));
        }

        let words = FileManager::load_words(&input_file)?;
        let chunks = self
            .chunk_words(&words)
            .with_context(|| format!("Failed to chunk {:?}", input_file))?;
        let rendered = self.render(&chunks)?;
        FileManager::write_to_file(&output_path, &rendered)?;

        info!(
            "{} words -> {} captions in {:?}: {:?}",
            words.len(),
            chunks.len(),
            start_time.elapsed(),
            output_path
        );

        Ok(RunOutcome::Written(output_path))
    }

    /// Chunk every word file under `input_dir`, writing next to each input
    pub fn run_folder(&self, input_dir: PathBuf, force_overwrite: bool) -> Result<FolderSummary> {
        if !FileManager::dir_exists(&input_dir) {
            return Err(anyhow!("Input directory does not exist: {:?}", input_dir));
        }

        info!("Processing word files in directory: {:?}", input_dir);

        let mut summary = FolderSummary::default();
        let files = FileManager::find_files(&input_dir, "json")?;

        for path in files.into_iter().filter(|p| !FileManager::is_generated_output(p)) {
            if let Err(e) = FileManager::load_words(&path) {
                warn!("Ignoring {:?}, not a word file: {:#}", path, e);
                summary.ignored += 1;
                continue;
            }

            let output_dir = path.parent().unwrap_or(Path::new(".")).to_path_buf();
            match self.run(path.clone(), output_dir, force_overwrite) {
                Ok(RunOutcome::Written(_)) => summary.processed += 1,
                Ok(RunOutcome::Skipped(_)) => summary.skipped += 1,
                Err(e) => {
                    error!("Error processing {:?}: {:#}", path, e);
                    summary.failed += 1;
                }
            }
        }

        info!(
            "Finished: {} processed, {} skipped, {} ignored, {} failed",
            summary.processed, summary.skipped, summary.ignored, summary.failed
        );

        Ok(summary)
    }
}
