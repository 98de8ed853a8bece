use std::fmt;

use serde::{Deserialize, Serialize};

use crate::alignment::AlignedWord;
use super::corrected::ParagraphSpan;

// @module: Reassembly of aligned words into a timed transcript

/// Paragraph of the aligned transcript
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignedParagraph {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speaker: Option<String>,

    /// Start of the paragraph's first word
    pub start: f64,

    /// End of the paragraph's last word
    pub end: f64,

    /// Paragraph words joined by single spaces
    pub text: String,
}

/// Corrected transcript carrying transferred timings.
///
/// Serializes in the same shape as a machine transcript, so an aligned output can be
/// fed back in as alignment input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlignedTranscript {
    pub words: Vec<AlignedWord>,
    pub paragraphs: Vec<AlignedParagraph>,
    pub transcript: String,
}

impl AlignedTranscript {
    /// Assemble paragraphs from resolved words and the paragraph spans of the corrected text.
    ///
    /// Spans reaching past the end of `words` are clipped; spans left empty are skipped.
    pub fn build(words: Vec<AlignedWord>, spans: &[ParagraphSpan]) -> Self {
        let paragraphs = spans
            .iter()
            .filter_map(|span| {
                let end = span.word_range.end.min(words.len());
                let start = span.word_range.start.min(end);
                let slice = &words[start..end];
                let (first, last) = (slice.first()?, slice.last()?);

                Some(AlignedParagraph {
                    speaker: span.speaker.clone(),
                    start: first.start,
                    end: last.end,
                    text: join_words(slice),
                })
            })
            .collect();

        let transcript = join_words(&words);

        Self {
            words,
            paragraphs,
            transcript,
        }
    }

    /// Serialize to JSON
    pub fn to_json(&self, pretty: bool) -> serde_json::Result<String> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }

    /// Render as plain text, one paragraph per block, with speaker labels
    pub fn to_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for AlignedTranscript {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, paragraph) in self.paragraphs.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            match &paragraph.speaker {
                Some(speaker) => writeln!(f, "[{}]: {}", speaker, paragraph.text)?,
                None => writeln!(f, "{}", paragraph.text)?,
            }
        }
        Ok(())
    }
}

fn join_words(words: &[AlignedWord]) -> String {
    words
        .iter()
        .map(|w| w.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}
