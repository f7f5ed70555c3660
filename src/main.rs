// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, anyhow, Context};
use log::{warn, info, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::path::{Path, PathBuf};
use std::io::Write;
use clap::{Parser, ValueEnum, CommandFactory, Subcommand};
use clap_complete::{generate, Shell};

use capchunk::app_config::{self, Config, OutputFormat};
use capchunk::app_controller::{Controller, RunOutcome};

/// CLI Wrapper for OutputFormat to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliOutputFormat {
    Json,
    Srt,
}

impl From<CliOutputFormat> for OutputFormat {
    fn from(cli_format: CliOutputFormat) -> Self {
        match cli_format {
            CliOutputFormat::Json => OutputFormat::Json,
            CliOutputFormat::Srt => OutputFormat::Srt,
        }
    }
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Chunk word timings into captions (default command)
    Chunk(ChunkArgs),

    /// Generate shell completions for capchunk
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct ChunkArgs {
    /// Word timing JSON file, or directory of them
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Directory for the caption file (defaults to the input's directory)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Output format
    #[arg(long, value_enum)]
    format: Option<CliOutputFormat>,

    /// Hard cap of words per caption (lowers the min and target words to fit)
    #[arg(long)]
    max_words: Option<usize>,

    /// Soft floor of words per caption
    #[arg(long)]
    min_words: Option<usize>,

    /// Word count where soft breaks may happen
    #[arg(long)]
    target_words: Option<usize>,

    /// Silence (ms) that forces a new caption
    #[arg(long)]
    pause_gap_ms: Option<u64>,

    /// Validate captions before writing them
    #[arg(long)]
    check: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "capchunk.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// capchunk - caption chunking for short-form video
///
/// Groups time-aligned words into short, readable on-screen captions.
#[derive(Parser, Debug)]
#[command(name = "capchunk")]
#[command(version)]
#[command(about = "Caption chunking for short-form video")]
#[command(long_about = "capchunk groups time-aligned spoken words into short on-screen captions.

INPUT:
    A JSON array of {\"text\", \"startMs\", \"endMs\"} objects, or an object
    with such an array under \"words\".

EXAMPLES:
    capchunk talk.json                          # Write talk.chunks.json
    capchunk --format srt talk.json             # Write talk.chunks.srt
    capchunk --max-words 5 --check talk.json    # Tighter captions, validated
    capchunk -f --log-level debug words/        # Re-chunk every file in a directory
    capchunk completions bash > capchunk.bash   # Generate bash completions

CONFIGURATION:
    Configuration is stored in capchunk.json by default. You can specify a
    different file with --config-path. If the file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Word timing JSON file, or directory of them
    #[arg(value_name = "INPUT_PATH")]
    input_path: Option<PathBuf>,

    /// Directory for the caption file (defaults to the input's directory)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Output format
    #[arg(long, value_enum)]
    format: Option<CliOutputFormat>,

    /// Hard cap of words per caption (lowers the min and target words to fit)
    #[arg(long)]
    max_words: Option<usize>,

    /// Soft floor of words per caption
    #[arg(long)]
    min_words: Option<usize>,

    /// Word count where soft breaks may happen
    #[arg(long)]
    target_words: Option<usize>,

    /// Silence (ms) that forces a new caption
    #[arg(long)]
    pause_gap_ms: Option<u64>,

    /// Validate captions before writing them
    #[arg(long)]
    check: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "capchunk.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation, filtered by the global max level
struct CustomLogger;

impl CustomLogger {
    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger);
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color code and tag for log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("1;31", "ERROR"),
            Level::Warn => ("1;33", "WARN "),
            Level::Info => ("1;32", "INFO "),
            Level::Debug => ("1;36", "DEBUG"),
            Level::Trace => ("1;35", "TRACE"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S%.3f");
            let (color, tag) = Self::style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "\x1B[{}m{} {} {}\x1B[0m",
                color, now, tag, record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // The level is updated after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "capchunk", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Chunk(args)) => run_chunk(args),
        None => {
            // Default behavior - use top-level args
            let input_path = cli.input_path.ok_or_else(|| {
                anyhow!("INPUT_PATH is required when no subcommand is specified")
            })?;

            let chunk_args = ChunkArgs {
                input_path,
                output_dir: cli.output_dir,
                force_overwrite: cli.force_overwrite,
                format: cli.format,
                max_words: cli.max_words,
                min_words: cli.min_words,
                target_words: cli.target_words,
                pause_gap_ms: cli.pause_gap_ms,
                check: cli.check,
                config_path: cli.config_path,
                log_level: cli.log_level,
            };
            run_chunk(chunk_args)
        }
    }
}

fn run_chunk(options: ChunkArgs) -> Result<()> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        let level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    let config = load_config(&options)?;

    // Validate the configuration after loading and overriding
    config.validate()
        .context("Configuration validation failed")?;

    if options.log_level.is_none() {
        log::set_max_level(config.log_level.to_level_filter());
    }

    let controller = Controller::with_config(config)?
        .with_output_check(options.check);

    if options.input_path.is_file() {
        let output_dir = options.output_dir.clone().unwrap_or_else(|| {
            options.input_path.parent().unwrap_or(Path::new(".")).to_path_buf()
        });
        match controller.run(options.input_path.clone(), output_dir, options.force_overwrite)? {
            RunOutcome::Written(path) => info!("Success: {:?}", path),
            RunOutcome::Skipped(path) => info!("Unchanged: {:?}", path),
        }
    } else if options.input_path.is_dir() {
        if options.output_dir.is_some() {
            warn!("--output-dir is ignored for directories; captions are written next to each input");
        }
        let summary = controller.run_folder(options.input_path.clone(), options.force_overwrite)?;
        if summary.failed > 0 {
            return Err(anyhow!("{} file(s) failed", summary.failed));
        }
    } else {
        return Err(anyhow!("Input path does not exist: {:?}", options.input_path));
    }

    Ok(())
}

// Load the config file, creating a default one when missing, then apply CLI overrides
fn load_config(options: &ChunkArgs) -> Result<Config> {
    let config_path = &options.config_path;
    let mut config = if Path::new(config_path).exists() {
        Config::from_file(config_path)?
    } else {
        warn!("Config file not found at '{}', creating default config.", config_path);
        let config = Config::default();
        config.save(config_path)?;
        config
    };

    if let Some(format) = &options.format {
        config.output.format = format.clone().into();
    }
    if let Some(max_words) = options.max_words {
        config.chunking.set_max_words(max_words);
    }
    if let Some(min_words) = options.min_words {
        config.chunking.min_words_per_chunk = min_words;
    }
    if let Some(target_words) = options.target_words {
        config.chunking.target_words_per_chunk = target_words;
    }
    if let Some(pause_gap_ms) = options.pause_gap_ms {
        config.chunking.pause_gap_ms = pause_gap_ms;
    }
    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }

    Ok(config)
}
