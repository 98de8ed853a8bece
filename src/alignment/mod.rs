/*!
 * Word alignment and timing transfer.
 *
 * This module holds the core of the library:
 * - `normalize`: word normalization used for equality during alignment
 * - `engine`: minimum edit distance alignment between two word sequences
 * - `timing`: transfer of source word timings onto the aligned target words
 *
 * Everything in here is pure and synchronous. All state lives inside a single
 * call, so independent alignments can run on as many threads as the caller likes.
 */

use serde::{Deserialize, Serialize};

pub mod normalize;
pub mod engine;
pub mod timing;

// Re-export main types
pub use normalize::{normalize_word, words_match};
pub use engine::{align, edit_distance, AlignmentEngine};
pub use timing::{resolve_timing, TimingResolver, FALLBACK_INTERVAL};

/// Kind of an alignment operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    /// Source and target words are equal after normalization
    Match,
    /// Target word replaces a different source word
    Substitute,
    /// Target word has no source counterpart
    Insert,
    /// Source word was dropped from the target
    Delete,
}

impl OperationKind {
    /// Whether this kind carries a source word timing onto the target
    pub fn is_anchor(self) -> bool {
        matches!(self, Self::Match | Self::Substitute)
    }

    /// Edit cost contributed by this kind
    pub fn cost(self) -> usize {
        match self {
            Self::Match => 0,
            Self::Substitute | Self::Insert | Self::Delete => 1,
        }
    }
}

/// One step of an alignment, pointing into the source and/or target sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    pub kind: OperationKind,

    /// Index into the source words (absent for inserts)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_index: Option<usize>,

    /// Index into the target words (absent for deletes)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_index: Option<usize>,
}

impl Operation {
    pub fn matched(source_index: usize, target_index: usize) -> Self {
        Self {
            kind: OperationKind::Match,
            source_index: Some(source_index),
            target_index: Some(target_index),
        }
    }

    pub fn substitute(source_index: usize, target_index: usize) -> Self {
        Self {
            kind: OperationKind::Substitute,
            source_index: Some(source_index),
            target_index: Some(target_index),
        }
    }

    pub fn insert(target_index: usize) -> Self {
        Self {
            kind: OperationKind::Insert,
            source_index: None,
            target_index: Some(target_index),
        }
    }

    pub fn delete(source_index: usize) -> Self {
        Self {
            kind: OperationKind::Delete,
            source_index: Some(source_index),
            target_index: None,
        }
    }
}

/// A time span in seconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimingInterval {
    pub start: f64,
    pub end: f64,
}

impl TimingInterval {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Length of the interval in seconds
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Split the interval into `parts` consecutive, equal-width pieces.
    ///
    /// Neighbouring pieces share their boundary value exactly and the last piece
    /// ends on `end`, so the pieces never overlap and always cover the whole span.
    pub fn subdivide(&self, parts: usize) -> Vec<TimingInterval> {
        if parts <= 1 {
            return vec![*self];
        }

        let width = self.end - self.start;
        let boundaries: Vec<f64> = (0..=parts)
            .map(|r| {
                if r == parts {
                    self.end
                } else {
                    self.start + r as f64 * width / parts as f64
                }
            })
            .collect();

        boundaries
            .windows(2)
            .map(|pair| TimingInterval::new(pair[0], pair[1]))
            .collect()
    }
}

/// A target word with its resolved timing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignedWord {
    pub text: String,
    pub start: f64,
    pub end: f64,
}

impl AlignedWord {
    pub fn new(text: impl Into<String>, interval: TimingInterval) -> Self {
        Self {
            text: text.into(),
            start: interval.start,
            end: interval.end,
        }
    }

    pub fn interval(&self) -> TimingInterval {
        TimingInterval::new(self.start, self.end)
    }
}

/// Operation counts for one alignment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AlignmentStats {
    pub matches: usize,
    pub substitutions: usize,
    pub insertions: usize,
    pub deletions: usize,
}

impl AlignmentStats {
    /// Count the operations of an alignment by kind
    pub fn from_operations(operations: &[Operation]) -> Self {
        let mut stats = Self::default();
        for op in operations {
            match op.kind {
                OperationKind::Match => stats.matches += 1,
                OperationKind::Substitute => stats.substitutions += 1,
                OperationKind::Insert => stats.insertions += 1,
                OperationKind::Delete => stats.deletions += 1,
            }
        }
        stats
    }

    /// Total edit cost of the alignment
    pub fn edit_distance(&self) -> usize {
        self.substitutions + self.insertions + self.deletions
    }

    /// Number of words present in the output
    pub fn output_words(&self) -> usize {
        self.matches + self.substitutions + self.insertions
    }
}

impl std::fmt::Display for AlignmentStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} matched, {} substituted, {} inserted, {} deleted (distance {})",
            self.matches,
            self.substitutions,
            self.insertions,
            self.deletions,
            self.edit_distance()
        )
    }
}
