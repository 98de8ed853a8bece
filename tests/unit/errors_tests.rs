/*!
 * Tests for error types and conversions
 */

use wordsync::alignment::Operation;
use wordsync::errors::{AlignmentError, AppError, TranscriptError};

#[test]
fn test_alignmentError_capacityExceeded_shouldDisplayCountsAndLimit() {
    let error = AlignmentError::CapacityExceeded { source_words: 6000, target_words: 10, limit: 5000 };
    let display = format!("{}", error);
    assert!(display.contains("capacity exceeded"));
    assert!(display.contains("6000"));
    assert!(display.contains("5000"));
}

#[test]
fn test_alignmentError_operationOutOfRange_shouldDisplayOperation() {
    let error = AlignmentError::OperationOutOfRange {
        operation: Operation::matched(4, 0),
        source_len: 2,
        target_len: 1,
    };
    let display = format!("{}", error);
    assert!(display.contains("out of range"));
    assert!(display.contains("source length 2"));
}

#[test]
fn test_transcriptError_invalidTiming_shouldDisplayIndexAndReason() {
    let error = TranscriptError::InvalidTiming { index: 3, start: 2.0, end: 1.0, reason: "end before start" };
    let display = format!("{}", error);
    assert!(display.contains("word 3"));
    assert!(display.contains("end before start"));
}

#[test]
fn test_appError_fromAlignmentError_shouldWrapCorrectly() {
    let error: AppError = AlignmentError::CapacityExceeded { source_words: 1, target_words: 1, limit: 0 }.into();
    assert!(matches!(error, AppError::Alignment(_)));
    assert!(error.to_string().starts_with("Alignment error"));
}

#[test]
fn test_appError_fromTranscriptError_shouldWrapCorrectly() {
    let error: AppError = TranscriptError::EmptyWord { index: 0 }.into();
    assert!(matches!(error, AppError::Transcript(TranscriptError::EmptyWord { index: 0 })));
}

#[test]
fn test_appError_fromIoError_shouldBecomeFileError() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.json");
    let error: AppError = io_error.into();
    assert!(matches!(error, AppError::File(_)));
    assert!(error.to_string().contains("missing.json"));
}

#[test]
fn test_appError_fromAnyhow_shouldBecomeUnknown() {
    let error: AppError = anyhow::anyhow!("something odd").into();
    assert!(matches!(error, AppError::Unknown(ref message) if message == "something odd"));
}
