use serde::{Deserialize, Serialize};

use crate::alignment::TimingInterval;
use crate::errors::TranscriptError;

// @module: Machine (ASR) transcript model and word extraction

// @struct: Timestamped word from the recognizer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MachineWord {
    // @field: Start time in seconds
    pub start: f64,

    // @field: End time in seconds
    pub end: f64,

    // @field: Recognized text
    pub text: String,
}

// @struct: Paragraph boundary as produced by the recognizer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MachineParagraph {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speaker: Option<String>,
    pub start: f64,
    pub end: f64,
}

/// Machine transcript as read from JSON
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MachineTranscript {
    /// Words in spoken order
    pub words: Vec<MachineWord>,

    /// Paragraph boundaries (not needed for alignment, kept for callers)
    #[serde(default)]
    pub paragraphs: Vec<MachineParagraph>,
}

/// Source side of an alignment: word texts with their parallel timings
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceWords {
    pub words: Vec<String>,
    pub timings: Vec<TimingInterval>,
}

impl SourceWords {
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl MachineTranscript {
    /// Parse a machine transcript from its JSON representation
    pub fn from_json(content: &str) -> Result<Self, TranscriptError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Extract the word texts and timings, validating every interval.
    ///
    /// The alignment core copies timings without looking at them, so this is the
    /// place where broken input gets rejected.
    pub fn extract(&self) -> Result<SourceWords, TranscriptError> {
        let mut words = Vec::with_capacity(self.words.len());
        let mut timings = Vec::with_capacity(self.words.len());

        for (index, word) in self.words.iter().enumerate() {
            validate_timing(index, word.start, word.end)?;

            let text = word.text.trim();
            if text.is_empty() {
                return Err(TranscriptError::EmptyWord { index });
            }

            words.push(text.to_string());
            timings.push(TimingInterval::new(word.start, word.end));
        }

        Ok(SourceWords { words, timings })
    }
}

fn validate_timing(index: usize, start: f64, end: f64) -> Result<(), TranscriptError> {
    let reason = if !start.is_finite() || !end.is_finite() {
        Some("non-finite value")
    } else if start < 0.0 {
        Some("negative start")
    } else if end < start {
        Some("end before start")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(TranscriptError::InvalidTiming { index, start, end, reason }),
        None => Ok(()),
    }
}
