// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, Context};
use log::{warn, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::path::{Path, PathBuf};
use std::io::Write;
use clap::{Args, Parser, ValueEnum, CommandFactory, Subcommand};
use clap_complete::{generate, Shell};

use wordsync::app_config::{self, Config};
use wordsync::app_controller::{Controller, PairStatus};

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Transfer timings from a machine transcript onto its corrected text
    Align(AlignArgs),

    /// Align every <name>.json / <name>.txt pair in a directory
    Batch(BatchArgs),

    /// Generate shell completions for wordsync
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug)]
struct AlignArgs {
    /// Machine transcript JSON with word timings
    #[arg(value_name = "MACHINE_JSON")]
    machine_path: PathBuf,

    /// Corrected plain text transcript
    #[arg(value_name = "CORRECTED_TEXT")]
    corrected_path: PathBuf,

    /// Output file (defaults to <name>.aligned.json next to the machine transcript)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    #[command(flatten)]
    overrides: ConfigOverrides,
}

#[derive(Args, Debug)]
struct BatchArgs {
    /// Directory searched recursively for transcript pairs
    #[arg(value_name = "INPUT_DIR")]
    input_dir: PathBuf,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Number of transcript pairs aligned at the same time
    #[arg(short, long)]
    jobs: Option<usize>,

    #[command(flatten)]
    overrides: ConfigOverrides,
}

#[derive(Args, Debug, Default)]
struct ConfigOverrides {
    /// Maximum number of words per transcript
    #[arg(long, conflicts_with = "no_limit")]
    max_words: Option<usize>,

    /// Align transcripts of any length
    #[arg(long)]
    no_limit: bool,

    /// Also write a plain text rendering of the aligned transcript
    #[arg(long)]
    text: bool,
}

impl ConfigOverrides {
    fn apply(&self, config: &mut Config) {
        if let Some(max_words) = self.max_words {
            config.alignment.max_words_per_sequence = Some(max_words);
        }
        if self.no_limit {
            config.alignment.max_words_per_sequence = None;
        }
        if self.text {
            config.output.write_text = true;
        }
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Transfer word timings from a machine transcript onto corrected text", long_about = None)]
#[command(after_help = "EXAMPLES:
    wordsync align episode.json episode.txt
    wordsync align episode.json episode.txt -o out/episode.json --text
    wordsync batch ./transcripts --jobs 8

INPUT FORMATS:
    Machine transcript: {\"words\": [{\"start\", \"end\", \"text\"}], \"paragraphs\": [...]}
    Corrected text:     one paragraph per line, optional [Name]: / Name: speaker labels")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json", global = true)]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum, global = true)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI colour for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level && metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {:<5} {}\x1B[0m",
                Self::color_for_level(record.level()),
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // The logger accepts everything; the effective level is set through log::set_max_level
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    if let Some(level) = &cli.log_level {
        let level: app_config::LogLevel = level.clone().into();
        log::set_max_level(level.level_filter());
    }

    match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "wordsync", &mut std::io::stdout());
            Ok(())
        }
        Commands::Align(args) => {
            let mut config = load_config(&cli.config_path, cli.log_level.is_some())?;
            args.overrides.apply(&mut config);

            let controller = Controller::with_config(config)?;
            let status = controller
                .run(args.machine_path, args.corrected_path, args.output, args.force_overwrite)
                .await?;

            if let PairStatus::Skipped { output } = status {
                println!("Skipped, output exists: {}", output.display());
            }
            Ok(())
        }
        Commands::Batch(args) => {
            let mut config = load_config(&cli.config_path, cli.log_level.is_some())?;
            args.overrides.apply(&mut config);
            if let Some(jobs) = args.jobs {
                config.processing.concurrent_jobs = jobs;
            }

            let controller = Controller::with_config(config)?;
            let summary = controller.run_folder(args.input_dir, args.force_overwrite).await?;

            if summary.failed > 0 {
                anyhow::bail!("{} transcript pair(s) failed to align", summary.failed);
            }
            Ok(())
        }
    }
}

// Load the configuration file, creating it with defaults when missing
fn load_config(config_path: &str, log_level_from_cli: bool) -> Result<Config> {
    let config = if Path::new(config_path).exists() {
        Config::from_file(config_path)?
    } else {
        warn!("Config file not found at '{}', creating default config.", config_path);
        let config = Config::default();

        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;
        std::fs::write(config_path, config_json)
            .context(format!("Failed to write default config to file: {}", config_path))?;

        config
    };

    // If log level was not set via command line, take it from the config
    if !log_level_from_cli {
        log::set_max_level(config.log_level.level_filter());
    }

    Ok(config)
}
