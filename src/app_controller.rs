use anyhow::{Result, Context, anyhow};
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, warn, info, debug};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::alignment::AlignmentStats;
use crate::alignment_service::AlignmentService;
use crate::app_config::Config;
use crate::file_utils::{FileManager, TranscriptPair};

// @module: Application controller for transcript alignment

/// What happened to one transcript pair
#[derive(Debug, Clone, PartialEq)]
pub enum PairStatus {
    /// Timings were transferred and written to `output`
    Aligned {
        output: PathBuf,
        stats: AlignmentStats,
    },
    /// Output already existed and overwriting was not requested
    Skipped {
        output: PathBuf,
    },
}

/// Counts reported at the end of a batch run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub aligned: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Main application controller for transcript alignment
#[derive(Debug, Clone)]
pub struct Controller {
    // @field: App configuration
    config: Config,

    // @field: Alignment pipeline built from the configuration
    service: AlignmentService,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;
        let service = AlignmentService::new(&config.alignment);

        Ok(Self { config, service })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Align one machine transcript with its corrected text.
    ///
    /// Without `output_path` the result goes next to the machine transcript as
    /// `<stem>.<suffix>.json`.
    pub async fn run(
        &self,
        machine_path: PathBuf,
        corrected_path: PathBuf,
        output_path: Option<PathBuf>,
        force_overwrite: bool,
    ) -> Result<PairStatus> {
        let start_time = Instant::now();
        let pair = TranscriptPair {
            machine: machine_path,
            corrected: corrected_path,
        };

        let controller = self.clone();
        let status = tokio::task::spawn_blocking(move || {
            controller.process_pair(&pair, output_path.as_deref(), force_overwrite)
        })
        .await
        .context("Alignment task panicked")??;

        if let PairStatus::Aligned { output, stats } = &status {
            info!("Aligned transcript written to {:?} ({})", output, stats);
            info!("Done in {}", Self::format_duration(start_time.elapsed()));
        }

        Ok(status)
    }

    /// Align every transcript pair found under `input_dir`.
    ///
    /// Pairs are processed concurrently, at most `processing.concurrent_jobs` at a time.
    /// A failing pair is logged and counted without stopping the others.
    pub async fn run_folder(&self, input_dir: PathBuf, force_overwrite: bool) -> Result<BatchSummary> {
        let start_time = Instant::now();

        if !FileManager::dir_exists(&input_dir) {
            return Err(anyhow!("Input directory does not exist: {:?}", input_dir));
        }

        let pairs = FileManager::find_transcript_pairs(&input_dir, &self.config.output.suffix)?;
        if pairs.is_empty() {
            return Err(anyhow!(
                "No transcript pairs (<name>.json + <name>.txt) found in directory: {:?}",
                input_dir
            ));
        }
        info!("Found {} transcript pair(s) in {:?}", pairs.len(), input_dir);

        let folder_pb = ProgressBar::new(pairs.len() as u64);
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%) {msg}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        folder_pb.set_style(template_result.progress_chars("=>-"));
        folder_pb.set_message("Aligning transcripts");

        let jobs = self.config.processing.concurrent_jobs.max(1);
        let mut results = stream::iter(pairs)
            .map(|pair| {
                let controller = self.clone();
                async move {
                    let name = pair
                        .machine
                        .file_name()
                        .map(|f| f.to_string_lossy().to_string())
                        .unwrap_or_else(|| "unknown".to_string());
                    let result = tokio::task::spawn_blocking(move || {
                        controller.process_pair(&pair, None, force_overwrite)
                    })
                    .await
                    .map_err(|e| anyhow!("Alignment task panicked: {}", e))
                    .and_then(|result| result);
                    (name, result)
                }
            })
            .buffer_unordered(jobs);

        let mut summary = BatchSummary::default();
        while let Some((name, result)) = results.next().await {
            match result {
                Ok(PairStatus::Aligned { stats, .. }) => {
                    debug!("{}: {}", name, stats);
                    summary.aligned += 1;
                }
                Ok(PairStatus::Skipped { .. }) => {
                    summary.skipped += 1;
                }
                Err(e) => {
                    folder_pb.suspend(|| error!("Error processing {}: {:#}", name, e));
                    summary.failed += 1;
                }
            }
            folder_pb.set_message(name);
            folder_pb.inc(1);
        }

        folder_pb.finish_with_message("Folder processing complete");

        let summary_message = format!(
            "Folder processing completed: {} aligned, {} skipped, {} errors",
            summary.aligned, summary.skipped, summary.failed
        );
        info!("{}", summary_message);

        let log_file_path = input_dir.join("wordsync.batch.log");
        let log_line = format!(
            "{} ({}) - Duration: {}",
            summary_message,
            input_dir.display(),
            Self::format_duration(start_time.elapsed())
        );
        if let Err(e) = FileManager::append_to_log_file(&log_file_path, &log_line) {
            warn!("Failed to write folder log to {:?}: {}", log_file_path, e);
        }

        Ok(summary)
    }

    /// Read, align and write one pair. Blocking; meant to run on a blocking thread.
    fn process_pair(&self, pair: &TranscriptPair, output_path: Option<&Path>, force_overwrite: bool) -> Result<PairStatus> {
        if !FileManager::file_exists(&pair.machine) {
            return Err(anyhow!("Machine transcript does not exist: {:?}", pair.machine));
        }
        if !FileManager::file_exists(&pair.corrected) {
            return Err(anyhow!("Corrected transcript does not exist: {:?}", pair.corrected));
        }

        let output = match output_path {
            Some(path) => path.to_path_buf(),
            None => {
                let output_dir = pair.machine.parent().unwrap_or(Path::new("."));
                FileManager::generate_output_path(&pair.machine, output_dir, &self.config.output.suffix, "json")
            }
        };

        if output.exists() && !force_overwrite {
            warn!("Skipping {:?}, output already exists (use -f to force overwrite)", output);
            return Ok(PairStatus::Skipped { output });
        }

        let machine_json = FileManager::read_to_string(&pair.machine)?;
        let corrected_text = FileManager::read_to_string(&pair.corrected)?;

        let outcome = self
            .service
            .align_json(&machine_json, &corrected_text)
            .map_err(|e| anyhow!("{}: {}", pair.machine.display(), e))?;

        let json = outcome
            .transcript
            .to_json(self.config.output.pretty_json)
            .context("Failed to serialize aligned transcript")?;
        FileManager::write_to_file(&output, &json)?;

        if self.config.output.write_text {
            FileManager::write_to_file(output.with_extension("txt"), &outcome.transcript.to_text())?;
        }

        Ok(PairStatus::Aligned {
            output,
            stats: outcome.stats,
        })
    }

    fn format_duration(duration: Duration) -> String {
        let total_seconds = duration.as_secs();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}
