use anyhow::{anyhow, Result};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::alignment::engine::DEFAULT_MAX_WORDS;
use crate::alignment::{TimingInterval, FALLBACK_INTERVAL};

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct Config {
    /// Alignment engine and timing resolver settings
    #[serde(default)]
    pub alignment: AlignmentConfig,

    /// Output file settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Batch processing settings
    #[serde(default)]
    pub processing: ProcessingConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Alignment configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AlignmentConfig {
    /// Maximum number of words in either sequence, `null` to disable the check
    ///
    /// The cost table grows with the product of both lengths; at the default of
    /// 5000 words per side it holds 25 million cells.
    #[serde(default = "default_max_words_per_sequence")]
    pub max_words_per_sequence: Option<usize>,

    /// Interval given to inserted words when nothing in the alignment matched
    #[serde(default = "default_fallback_interval")]
    pub fallback_interval: TimingInterval,
}

impl Default for AlignmentConfig {
    fn default() -> Self {
        Self {
            max_words_per_sequence: default_max_words_per_sequence(),
            fallback_interval: default_fallback_interval(),
        }
    }
}

/// Output configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct OutputConfig {
    /// Pretty-print the JSON output
    #[serde(default = "default_true")]
    pub pretty_json: bool,

    /// Also write a plain text rendering next to the JSON output
    #[serde(default)]
    pub write_text: bool,

    /// Suffix inserted before the extension of generated files
    #[serde(default = "default_output_suffix")]
    pub suffix: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            pretty_json: true,
            write_text: false,
            suffix: default_output_suffix(),
        }
    }
}

/// Batch processing configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ProcessingConfig {
    /// Number of transcript pairs aligned at the same time in batch mode
    #[serde(default = "default_concurrent_jobs")]
    pub concurrent_jobs: usize,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            concurrent_jobs: default_concurrent_jobs(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    // @returns: Matching filter for the log crate
    pub fn level_filter(&self) -> LevelFilter {
        match self {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

fn default_max_words_per_sequence() -> Option<usize> {
    Some(DEFAULT_MAX_WORDS)
}

fn default_fallback_interval() -> TimingInterval {
    FALLBACK_INTERVAL
}

fn default_true() -> bool {
    true
}

fn default_output_suffix() -> String {
    "aligned".to_string()
}

fn default_concurrent_jobs() -> usize {
    4
}

impl Config {
    /// Load a configuration file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|e| anyhow!("Failed to open config file {}: {}", path.display(), e))?;
        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .map_err(|e| anyhow!("Failed to parse config file {}: {}", path.display(), e))?;
        Ok(config)
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.alignment.max_words_per_sequence == Some(0) {
            return Err(anyhow!("alignment.max_words_per_sequence must be greater than zero (use null to disable)"));
        }

        let fallback = self.alignment.fallback_interval;
        if !fallback.start.is_finite() || !fallback.end.is_finite() {
            return Err(anyhow!("alignment.fallback_interval must be finite"));
        }
        if fallback.start < 0.0 || fallback.end < fallback.start {
            return Err(anyhow!(
                "alignment.fallback_interval [{}, {}] must be non-negative with start <= end",
                fallback.start, fallback.end
            ));
        }

        if self.processing.concurrent_jobs == 0 {
            return Err(anyhow!("processing.concurrent_jobs must be at least 1"));
        }

        let suffix = self.output.suffix.trim();
        if suffix.is_empty() || suffix.contains(['/', '\\']) {
            return Err(anyhow!("output.suffix must be a non-empty file name fragment"));
        }

        Ok(())
    }
}
