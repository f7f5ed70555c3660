/*!
 * Tests for error types and conversions
 */

use capchunk::errors::{AppError, ConfigError, InputError};
use capchunk::{TimedWord, validate_words};

#[test]
fn test_configError_zeroLimit_shouldNameField() {
    let error = ConfigError::ZeroLimit { field: "pauseGapMs" };
    let display = format!("{}", error);
    assert!(display.contains("pauseGapMs"));
    assert!(display.contains("greater than zero"));
}

#[test]
fn test_configError_targetOutOfRange_shouldDisplayBounds() {
    let error = ConfigError::TargetOutOfRange { target: 9, min: 2, max: 7 };
    let display = format!("{}", error);
    assert!(display.contains('9'));
    assert!(display.contains('2'));
    assert!(display.contains('7'));
}

#[test]
fn test_inputError_outOfOrder_shouldDisplayBothStarts() {
    let error = InputError::OutOfOrder {
        index: 3,
        start_ms: 100,
        previous_start_ms: 250,
    };
    let display = format!("{}", error);
    assert!(display.contains("Word 3"));
    assert!(display.contains("100ms"));
    assert!(display.contains("250ms"));
}

#[test]
fn test_validateWords_withOverlappingWord_shouldReportPreviousEnd() {
    let result = validate_words(&[TimedWord::new("first", 0, 2800), TimedWord::new("late", 2700, 3100)]);

    assert_eq!(
        result,
        Err(InputError::OverlappingWord {
            index: 1,
            start_ms: 2700,
            previous_end_ms: 2800
        })
    );
    let display = result.unwrap_err().to_string();
    assert!(display.contains("2700ms"));
    assert!(display.contains("2800ms"));
}

#[test]
fn test_appError_fromConfigError_shouldWrap() {
    let error: AppError = ConfigError::MinExceedsMax { min: 8, max: 7 }.into();
    assert!(matches!(error, AppError::Config(ConfigError::MinExceedsMax { min: 8, max: 7 })));
    assert!(error.to_string().starts_with("Configuration error"));
}

#[test]
fn test_appError_fromInputError_shouldWrap() {
    let error: AppError = validate_words(&[TimedWord::new("", 0, 10)])
        .map_err(AppError::from)
        .unwrap_err();
    assert!(matches!(error, AppError::Input(InputError::EmptyText { index: 0 })));
}

#[test]
fn test_appError_fromJsonError_shouldWrap() {
    let json_error = serde_json::from_str::<Vec<TimedWord>>("[oops").unwrap_err();
    let error: AppError = json_error.into();
    assert!(matches!(error, AppError::Json(_)));
    assert!(error.to_string().starts_with("JSON error"));
}

#[test]
fn test_appError_fromIoAndAnyhow_shouldConvert() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "words.json missing");
    let error: AppError = io_error.into();
    assert!(matches!(error, AppError::File(ref message) if message.contains("words.json")));

    let error: AppError = anyhow::anyhow!("something broke").into();
    assert!(matches!(error, AppError::Unknown(ref message) if message == "something broke"));
}
