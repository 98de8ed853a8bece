/*!
 * Transcript input and output.
 *
 * - `machine`: the timestamped recognizer output and extraction of its words
 * - `corrected`: the human-corrected plain text, split into words, paragraphs and speakers
 * - `reconstruct`: reassembly of aligned words into a timed, serializable transcript
 */

pub mod machine;
pub mod corrected;
pub mod reconstruct;

// Re-export main types
pub use machine::{MachineParagraph, MachineTranscript, MachineWord, SourceWords};
pub use corrected::{split_speaker_label, CorrectedTranscript, ParagraphSpan};
pub use reconstruct::{AlignedParagraph, AlignedTranscript};
