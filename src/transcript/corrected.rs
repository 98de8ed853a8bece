use std::ops::Range;

use once_cell::sync::Lazy;
use regex::Regex;

// @module: Corrected plain-text transcript parsing

// @const: "[Name]:" or "[Name]" at the start of a paragraph
static BRACKET_LABEL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\[([^\[\]]+)\]:?\s*(.*)$").unwrap()
});

// @const: "Name:" at the start of a paragraph, followed by whitespace or end of line
static COLON_LABEL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([^:\[\]]+?):(?:\s+(.*))?$").unwrap()
});

/// Maximum number of words in a speaker name
const MAX_SPEAKER_WORDS: usize = 6;

/// Characters that mark a "Name:" candidate as ordinary sentence text
const SENTENCE_PUNCTUATION: &[char] = &['.', ',', '!', '?', ';'];

/// A paragraph of the corrected transcript, as a range of target words
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParagraphSpan {
    pub speaker: Option<String>,
    pub word_range: Range<usize>,
}

/// Corrected transcript split into flat target words and paragraph spans
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CorrectedTranscript {
    pub words: Vec<String>,
    pub paragraphs: Vec<ParagraphSpan>,
}

impl CorrectedTranscript {
    /// Parse corrected text into words and paragraphs.
    ///
    /// Every non-empty line is a paragraph. A leading speaker label is removed from the
    /// words and recorded on the paragraph. A line holding only a label names the
    /// speaker of the next paragraph.
    pub fn parse(text: &str) -> Self {
        let mut transcript = CorrectedTranscript::default();
        let mut pending_speaker: Option<String> = None;

        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let (speaker, body) = split_speaker_label(line);
            let start = transcript.words.len();
            transcript
                .words
                .extend(body.split_whitespace().map(str::to_string));

            if transcript.words.len() == start {
                if speaker.is_some() {
                    pending_speaker = speaker;
                }
                continue;
            }

            let speaker = speaker.or_else(|| pending_speaker.take());
            pending_speaker = None;

            transcript.paragraphs.push(ParagraphSpan {
                speaker,
                word_range: start..transcript.words.len(),
            });
        }

        transcript
    }

    pub fn word_count(&self) -> usize {
        self.words.len()
    }
}

/// Split a leading speaker label off a paragraph line.
///
/// Returns the speaker (if the line starts with a valid label) and the remaining text.
pub fn split_speaker_label(line: &str) -> (Option<String>, &str) {
    if let Some(caps) = BRACKET_LABEL_REGEX.captures(line) {
        let name = caps.get(1).map_or("", |m| m.as_str()).trim();
        if is_speaker_name(name) {
            let body = caps.get(2).map_or("", |m| m.as_str());
            return (Some(name.to_string()), body);
        }
    }

    if let Some(caps) = COLON_LABEL_REGEX.captures(line) {
        let name = caps.get(1).map_or("", |m| m.as_str()).trim();
        if is_speaker_name(name) && !name.contains(SENTENCE_PUNCTUATION) {
            let body = caps.get(2).map_or("", |m| m.as_str());
            return (Some(name.to_string()), body);
        }
    }

    (None, line)
}

fn is_speaker_name(name: &str) -> bool {
    let count = name.split_whitespace().count();
    (1..=MAX_SPEAKER_WORDS).contains(&count)
}
