/*!
 * Error types for the wordsync library.
 *
 * This module contains custom error types for the alignment core and the
 * transcript collaborators, using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

use crate::alignment::Operation;

/// Errors raised by the alignment engine and the timing resolver
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AlignmentError {
    /// One of the sequences is longer than the configured ceiling
    #[error("Alignment capacity exceeded: {source_words} source / {target_words} target words (limit {limit} per sequence)")]
    CapacityExceeded {
        /// Number of source words supplied
        source_words: usize,
        /// Number of target words supplied
        target_words: usize,
        /// Configured per-sequence ceiling
        limit: usize,
    },

    /// An operation points outside the sequences handed to the resolver
    #[error("Operation {operation:?} is out of range (source length {source_len}, target length {target_len})")]
    OperationOutOfRange {
        /// The offending operation
        operation: Operation,
        /// Length of the source timing list
        source_len: usize,
        /// Length of the target word list
        target_len: usize,
    },
}

/// Errors that can occur while reading transcripts
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TranscriptError {
    /// The machine transcript is not valid JSON for the expected shape
    #[error("Failed to parse machine transcript: {0}")]
    Parse(String),

    /// A word carries a timing that cannot be transferred
    #[error("Invalid timing for word {index}: [{start}, {end}] ({reason})")]
    InvalidTiming {
        /// Index of the word in the machine transcript
        index: usize,
        /// Start time in seconds
        start: f64,
        /// End time in seconds
        end: f64,
        /// Why the interval was rejected
        reason: &'static str,
    },

    /// A word has no text
    #[error("Empty text for word {index}")]
    EmptyWord {
        /// Index of the word in the machine transcript
        index: usize,
    },
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from the alignment core
    #[error("Alignment error: {0}")]
    Alignment(#[from] AlignmentError),

    /// Error from transcript extraction
    #[error("Transcript error: {0}")]
    Transcript(#[from] TranscriptError),

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

impl From<serde_json::Error> for TranscriptError {
    fn from(error: serde_json::Error) -> Self {
        Self::Parse(error.to_string())
    }
}
