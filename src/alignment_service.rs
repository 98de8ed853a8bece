use log::{debug, warn};

use crate::alignment::{AlignmentEngine, AlignmentStats, TimingResolver};
use crate::app_config::AlignmentConfig;
use crate::errors::AppError;
use crate::transcript::{AlignedTranscript, CorrectedTranscript, MachineTranscript};

// @module: End-to-end alignment of a machine transcript with its corrected text

// @struct: Result of aligning one transcript pair
#[derive(Debug, Clone)]
pub struct AlignmentOutcome {
    // @field: Corrected transcript with transferred timings
    pub transcript: AlignedTranscript,

    // @field: Operation counts of the word alignment
    pub stats: AlignmentStats,
}

/// Runs extraction, alignment, timing resolution and reconstruction
#[derive(Debug, Clone, Default)]
pub struct AlignmentService {
    engine: AlignmentEngine,
    resolver: TimingResolver,
}

impl AlignmentService {
    /// Create a service from the alignment section of the configuration
    pub fn new(config: &AlignmentConfig) -> Self {
        Self {
            engine: AlignmentEngine::new(config.max_words_per_sequence),
            resolver: TimingResolver::with_fallback(config.fallback_interval),
        }
    }

    /// Transfer the timings of `machine` onto `corrected_text`
    pub fn align_transcript(&self, machine: &MachineTranscript, corrected_text: &str) -> Result<AlignmentOutcome, AppError> {
        let source = machine.extract()?;
        let corrected = CorrectedTranscript::parse(corrected_text);

        if source.is_empty() && !corrected.words.is_empty() {
            warn!(
                "Machine transcript has no words, all {} corrected words get the fallback interval",
                corrected.word_count()
            );
        }

        let operations = self.engine.align(&source.words, &corrected.words)?;
        let stats = AlignmentStats::from_operations(&operations);

        let words = self.resolver.resolve(&operations, &source.timings, &corrected.words)?;
        debug!(
            "Resolved {} words across {} paragraphs ({})",
            words.len(),
            corrected.paragraphs.len(),
            stats
        );

        Ok(AlignmentOutcome {
            transcript: AlignedTranscript::build(words, &corrected.paragraphs),
            stats,
        })
    }

    /// Parse the machine transcript JSON and align it with `corrected_text`
    pub fn align_json(&self, machine_json: &str, corrected_text: &str) -> Result<AlignmentOutcome, AppError> {
        let machine = MachineTranscript::from_json(machine_json)?;
        self.align_transcript(&machine, corrected_text)
    }
}
