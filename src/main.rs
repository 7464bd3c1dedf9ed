// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use std::fs::File;
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

use crate::app_config::Config;
use app_controller::Controller;

mod align;
mod app_config;
mod app_controller;
mod errors;
mod file_utils;
mod subtitle_processor;

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

fn to_level_filter(level: &app_config::LogLevel) -> LevelFilter {
    match level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Refine auto-generated subtitles against a transcript (default command)
    #[command(alias = "refine")]
    Refine(RefineArgs),

    /// Generate shell completions for subrefine
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct RefineArgs {
    /// Transcript text file with coarse paragraph timestamps
    #[arg(value_name = "TRANSCRIPT")]
    transcript: PathBuf,

    /// Auto-generated subtitle file (SRT) with reliable timing
    #[arg(value_name = "AUTO_SUBS")]
    auto_subs: PathBuf,

    /// Output subtitle file (defaults to <transcript stem>.refined.srt)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Force overwrite of an existing output file
    #[arg(short, long)]
    force_overwrite: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Maximum caption length in characters
    #[arg(long)]
    max_caption_length: Option<usize>,

    /// Minimum fraction of caption words that must match (0..1]
    #[arg(long)]
    match_threshold: Option<f64>,
}

/// SubRefine - transcript-guided subtitle refinement
///
/// Aligns a human-authored transcript with an auto-generated subtitle track
/// and writes a new track carrying the transcript's wording with refined
/// timing.
#[derive(Parser, Debug)]
#[command(name = "subrefine")]
#[command(version = "1.0.0")]
#[command(about = "Transcript-guided subtitle refinement")]
#[command(long_about = "SubRefine aligns a loosely time-stamped human transcript with reliably
time-stamped auto-generated subtitles, producing captions whose wording
comes from the transcript and whose timing comes from the auto track.

EXAMPLES:
    subrefine talk.txt talk.auto.srt                # Write talk.refined.srt
    subrefine talk.txt talk.auto.srt -o talk.srt    # Explicit output path
    subrefine -f talk.txt talk.auto.srt             # Overwrite existing output
    subrefine --log-level debug talk.txt talk.auto.srt
    subrefine completions bash > subrefine.bash     # Generate bash completions

CONFIGURATION:
    Tunables (caption length budget, stretch expansion, match threshold) are
    stored in conf.json by default. You can specify a different file with
    --config. If the config file doesn't exist, a default one will be
    created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Transcript text file with coarse paragraph timestamps
    #[arg(value_name = "TRANSCRIPT")]
    transcript: Option<PathBuf>,

    /// Auto-generated subtitle file (SRT) with reliable timing
    #[arg(value_name = "AUTO_SUBS")]
    auto_subs: Option<PathBuf>,

    /// Output subtitle file (defaults to <transcript stem>.refined.srt)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Force overwrite of an existing output file
    #[arg(short, long)]
    force_overwrite: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Maximum caption length in characters
    #[arg(long)]
    max_caption_length: Option<usize>,

    /// Minimum fraction of caption words that must match (0..1]
    #[arg(long)]
    match_threshold: Option<f64>,
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

    // @returns: ANSI color code for log level
    fn get_color_for_level(level: Level) -> &'static str {
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
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let color = Self::get_color_for_level(record.level());
            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "{}{} {}\x1B[0m", color, now, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "subrefine", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Refine(args)) => run_refine(args),
        None => {
            // Default behavior - use top-level args for backwards compatibility
            let transcript = cli
                .transcript
                .ok_or_else(|| anyhow!("TRANSCRIPT is required when no subcommand is specified"))?;
            let auto_subs = cli
                .auto_subs
                .ok_or_else(|| anyhow!("AUTO_SUBS is required when no subcommand is specified"))?;

            run_refine(RefineArgs {
                transcript,
                auto_subs,
                output: cli.output,
                force_overwrite: cli.force_overwrite,
                config_path: cli.config_path,
                log_level: cli.log_level,
                max_caption_length: cli.max_caption_length,
                match_threshold: cli.match_threshold,
            })
        }
    }
}

fn run_refine(options: RefineArgs) -> Result<()> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        let config_log_level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(to_level_filter(&config_log_level));
    }

    // Load or create configuration
    let config_path = &options.config_path;
    let mut config = if Path::new(config_path).exists() {
        let file = File::open(config_path)
            .context(format!("Failed to open config file: {}", config_path))?;
        let reader = BufReader::new(file);
        serde_json::from_reader::<_, Config>(reader)
            .context(format!("Failed to parse config file: {}", config_path))?
    } else {
        warn!("Config file not found at '{}', creating default config.", config_path);
        let config = Config::default();

        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;
        std::fs::write(config_path, config_json)
            .context(format!("Failed to write default config to file: {}", config_path))?;
        config
    };

    // Override config with CLI options if provided
    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }
    if let Some(max_caption_length) = options.max_caption_length {
        config.segmentation.max_caption_length = max_caption_length;
    }
    if let Some(match_threshold) = options.match_threshold {
        config.alignment.match_threshold = match_threshold;
    }

    // Validate the configuration after loading and overriding
    config.validate().context("Configuration validation failed")?;

    // If log level was not set via command line, update it from config now
    if options.log_level.is_none() {
        log::set_max_level(to_level_filter(&config.log_level));
    }

    let output_path = options
        .output
        .unwrap_or_else(|| Controller::default_output_path(&options.transcript));

    let controller = Controller::with_config(config)?;
    controller.run(
        options.transcript,
        options.auto_subs,
        output_path,
        options.force_overwrite,
    )
}
