/*!
 * # wordsync - word timing transfer for corrected transcripts
 *
 * A Rust library that moves word-level timing from a machine (ASR) transcript onto a
 * human-corrected version of the same transcript, without touching the audio.
 *
 * ## Features
 *
 * - Minimum edit distance word alignment with a fixed, reproducible tie-break order
 * - Case and trailing-punctuation insensitive word comparison
 * - Timing transfer for matched and substituted words
 * - Borrowed timings for inserted words, split evenly when several share one interval
 * - Speaker labels and paragraphs in the corrected text
 * - JSON and plain text output
 * - Concurrent batch processing of whole directories
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `alignment`: the pure alignment core:
 *   - `alignment::normalize`: word normalization
 *   - `alignment::engine`: edit distance alignment
 *   - `alignment::timing`: timing transfer onto target words
 * - `transcript`: machine transcript extraction, corrected text parsing, reconstruction
 * - `alignment_service`: end-to-end pipeline for one transcript pair
 * - `app_config`: Configuration management
 * - `app_controller`: File-level and folder-level processing
 * - `file_utils`: File system operations
 * - `errors`: Custom error types for the library
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
pub mod alignment;
pub mod transcript;
pub mod alignment_service;
pub mod app_config;
pub mod app_controller;
pub mod file_utils;
pub mod errors;

// Re-export main types for easier usage
pub use alignment::{align, resolve_timing, normalize_word, AlignedWord, AlignmentEngine, Operation, OperationKind, TimingInterval, TimingResolver};
pub use alignment_service::{AlignmentOutcome, AlignmentService};
pub use app_config::Config;
pub use transcript::{AlignedTranscript, CorrectedTranscript, MachineTranscript};
pub use errors::{AlignmentError, AppError, TranscriptError};
