/*!
 * Controller runs over word files on disk
 */

use anyhow::Result;
use std::fs;
use std::path::Path;

use capchunk::app_config::{Config, OutputFormat};
use capchunk::app_controller::{Controller, FolderSummary, RunOutcome};
use capchunk::{CaptionChunk, TimedWord};
use crate::common::{self, words};

fn talk() -> Vec<TimedWord> {
    words(&[
        ("Wait.", 0, 400),
        ("But", 750, 1050),
        ("then", 1050, 1350),
        ("it", 1350, 1600),
        ("worked", 1600, 2000),
        ("completely", 2000, 2600),
    ])
}

fn read_chunks(path: &Path) -> Result<Vec<CaptionChunk>> {
    Ok(serde_json::from_str(&fs::read_to_string(path)?)?)
}

/// A word file is chunked into a JSON caption file next to the requested directory
#[test]
fn test_run_withJsonFormat_shouldWriteChunkFile() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_word_file(temp_dir.path(), "talk.json", &talk())?;
    let out_dir = temp_dir.path().join("out");
    let controller = Controller::with_config(Config::default())?;

    let outcome = controller.run(input, out_dir.clone(), false)?;

    let expected_path = out_dir.join("talk.chunks.json");
    assert_eq!(outcome, RunOutcome::Written(expected_path.clone()));
    let chunks = read_chunks(&expected_path)?;
    assert_eq!(chunks.len(), 2);
    assert_eq!(chunks[0].text, "Wait.");
    assert_eq!(chunks[0].end_ms, 670);
    assert_eq!(chunks[1].end_ms, 2684);
    Ok(())
}

/// SRT output renders one cue per chunk
#[test]
fn test_run_withSrtFormat_shouldWriteSubRip() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_word_file(temp_dir.path(), "talk.json", &talk())?;
    let mut config = Config::default();
    config.output.format = OutputFormat::Srt;
    let controller = Controller::with_config(config)?;

    controller.run(input, temp_dir.path().to_path_buf(), false)?;

    let content = fs::read_to_string(temp_dir.path().join("talk.chunks.srt"))?;
    assert_eq!(
        content,
        "1\n00:00:00,000 --> 00:00:00,670\nWait.\n\n\
         2\n00:00:00,750 --> 00:00:02,684\nBut then it worked completely\n\n"
    );
    Ok(())
}

/// Compact JSON is written on a single line
#[test]
fn test_run_withPrettyDisabled_shouldWriteCompactJson() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_word_file(temp_dir.path(), "talk.json", &talk())?;
    let mut config = Config::default();
    config.output.pretty = false;
    let controller = Controller::with_config(config)?;

    controller.run(input, temp_dir.path().to_path_buf(), false)?;

    let content = fs::read_to_string(temp_dir.path().join("talk.chunks.json"))?;
    assert!(!content.contains('\n'));
    assert!(content.contains("\"startMs\":750"));
    Ok(())
}

/// Existing output is left alone unless overwrite is forced
#[test]
fn test_run_withExistingOutput_shouldSkipUnlessForced() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_word_file(temp_dir.path(), "talk.json", &talk())?;
    let out_dir = temp_dir.path().to_path_buf();
    let output_path = out_dir.join("talk.chunks.json");
    let controller = Controller::with_config(Config::default())?;

    controller.run(input.clone(), out_dir.clone(), false)?;
    fs::write(&output_path, "stale")?;

    let skipped = controller.run(input.clone(), out_dir.clone(), false)?;
    assert_eq!(skipped, RunOutcome::Skipped(output_path.clone()));
    assert_eq!(fs::read_to_string(&output_path)?, "stale");

    let forced = controller.run(input, out_dir, true)?;
    assert_eq!(forced, RunOutcome::Written(output_path.clone()));
    assert_eq!(read_chunks(&output_path)?.len(), 2);
    Ok(())
}

/// Malformed word timings are rejected and nothing is written
#[test]
fn test_run_withOutOfOrderWords_shouldFailWithoutOutput() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_word_file(
        temp_dir.path(),
        "broken.json",
        &words(&[("late", 900, 1200), ("early", 100, 400)]),
    )?;
    let controller = Controller::with_config(Config::default())?;

    let result = controller.run(input, temp_dir.path().to_path_buf(), false);

    assert!(result.is_err());
    assert!(!temp_dir.path().join("broken.chunks.json").exists());
    Ok(())
}

/// A word starting before its predecessor ends is rejected instead of producing overlapping captions
#[test]
fn test_run_withOverlappingWords_shouldFailWithoutOutput() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let mut input = common::monotone_words(7, 400, 0);
    input.push(TimedWord::new("late", 2700, 3100));
    let path = common::create_word_file(temp_dir.path(), "overlap.json", &input)?;
    let controller = Controller::with_config(Config::default())?.with_output_check(true);

    let result = controller.run(path, temp_dir.path().to_path_buf(), false);

    let error = result.expect_err("overlapping words should be rejected");
    assert!(format!("{:#}", error).contains("before the previous word ends at 2800ms"));
    assert!(!temp_dir.path().join("overlap.chunks.json").exists());
    Ok(())
}

/// Missing inputs are reported as errors
#[test]
fn test_run_withMissingInput_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let controller = Controller::with_config(Config::default())?;

    assert!(controller
        .run(temp_dir.path().join("nope.json"), temp_dir.path().to_path_buf(), false)
        .is_err());
    assert!(controller
        .run_folder(temp_dir.path().join("nope"), false)
        .is_err());
    Ok(())
}

/// Inconsistent configuration is refused when the controller is built
#[test]
fn test_withConfig_withInvalidChunking_shouldFail() {
    let mut config = Config::default();
    config.chunking.min_words_per_chunk = 10;

    assert!(Controller::with_config(config).is_err());
}

/// Output checking accepts what the chunker produces
#[test]
fn test_run_withOutputCheck_shouldPassOnRandomSpeech() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_word_file(temp_dir.path(), "random.json", &common::random_words(11, 400))?;
    let controller = Controller::with_config(Config::default())?.with_output_check(true);

    let outcome = controller.run(input, temp_dir.path().to_path_buf(), false)?;

    assert!(matches!(outcome, RunOutcome::Written(_)));
    Ok(())
}

/// Folder runs count outcomes and ignore their own generated files
#[test]
fn test_runFolder_shouldSummarizeAndIgnoreGeneratedFiles() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let nested = temp_dir.path().join("nested");
    fs::create_dir_all(&nested)?;
    common::create_word_file(temp_dir.path(), "a.json", &talk())?;
    common::create_word_file(&nested, "b.json", &common::monotone_words(20, 400, 0))?;
    common::create_test_file(temp_dir.path(), "bad.json", "{ \"segments\": [] }")?;
    common::create_word_file(
        temp_dir.path(),
        "unordered.json",
        &words(&[("late", 900, 1200), ("early", 100, 400)]),
    )?;
    common::create_test_file(temp_dir.path(), "notes.txt", "not a word file")?;
    let controller = Controller::with_config(Config::default())?;

    let first = controller.run_folder(temp_dir.path().to_path_buf(), false)?;
    assert_eq!(first, FolderSummary { processed: 2, skipped: 0, ignored: 1, failed: 1 });
    assert!(temp_dir.path().join("a.chunks.json").exists());
    assert_eq!(read_chunks(&nested.join("b.chunks.json"))?.len(), 3);

    let second = controller.run_folder(temp_dir.path().to_path_buf(), false)?;
    assert_eq!(second, FolderSummary { processed: 0, skipped: 2, ignored: 1, failed: 1 });

    let forced = controller.run_folder(temp_dir.path().to_path_buf(), true)?;
    assert_eq!(forced, FolderSummary { processed: 2, skipped: 0, ignored: 1, failed: 1 });
    Ok(())
}

/// A config file sitting next to the word files is ignored rather than counted as a failure
#[test]
fn test_runFolder_withConfigFileInDirectory_shouldIgnoreIt() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_word_file(temp_dir.path(), "talk.json", &talk())?;
    Config::default().save(temp_dir.path().join("capchunk.json"))?;
    let controller = Controller::with_config(Config::default())?;

    let summary = controller.run_folder(temp_dir.path().to_path_buf(), false)?;

    assert_eq!(summary, FolderSummary { processed: 1, skipped: 0, ignored: 1, failed: 0 });
    assert!(!temp_dir.path().join("capchunk.chunks.json").exists());
    Ok(())
}

/// Chunking through the controller matches the library chunker
#[test]
fn test_controller_chunkWords_shouldMatchLibrary() -> Result<()> {
    let controller = Controller::with_config(Config::default())?;
    let input = common::random_words(5, 120);

    let via_controller = controller.chunk_words(&input)?;
    let via_library = capchunk::chunk_words(&input, &controller.config().chunking)?;

    assert_eq!(via_controller, via_library);
    Ok(())
}
