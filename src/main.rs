// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result, anyhow};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use indicatif::{ProgressBar, ProgressStyle};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, debug, error, info, warn};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use lectern::app_config::{self, Config};
use lectern::file_utils::FileManager;
use lectern::{ContentSummary, clean_json_response, extract_meaningful_content};

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
    /// Reduce a transcript (or a directory of transcripts) to its meaningful content
    Extract(ExtractArgs),

    /// Recover the JSON object from a raw model reply
    CleanJson(CleanJsonArgs),

    /// Generate shell completions for lectern
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct ExtractArgs {
    /// Transcript file or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Write the extracted content here instead of stdout (single file only)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print extraction statistics as JSON
    #[arg(short, long)]
    stats: bool,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,
}

#[derive(Parser, Debug)]
struct CleanJsonArgs {
    /// File holding the raw reply; stdin is read when omitted
    #[arg(value_name = "INPUT_PATH")]
    input_path: Option<PathBuf>,
}

/// Lectern - quiz material from lecture transcripts
///
/// Prepares video-lecture transcripts for exercise generation and recovers
/// JSON objects from noisy model replies.
#[derive(Parser, Debug)]
#[command(name = "lectern")]
#[command(version)]
#[command(about = "Transcript extraction and model-reply cleanup")]
#[command(long_about = "Lectern reduces slide-annotated lecture transcripts to the content worth
sending to a model, and recovers JSON objects from model replies.

EXAMPLES:
    lectern extract lesson.md                     # Print the extracted content
    lectern extract lesson.md -o lesson.clean.md  # Write it to a file
    lectern extract --stats lesson.md             # Print reduction statistics
    lectern extract -f transcripts/               # Process a whole directory
    lectern clean-json reply.txt                  # Print the JSON object in a reply
    cat reply.txt | lectern clean-json            # Same, reading stdin
    lectern completions bash > lectern.bash       # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically.")]
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

    // @returns: ANSI colour and tag for log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("\x1B[1;31m", "ERROR"),
            Level::Warn => ("\x1B[1;33m", "WARN "),
            Level::Info => ("\x1B[1;32m", "INFO "),
            Level::Debug => ("\x1B[1;36m", "DEBUG"),
            Level::Trace => ("\x1B[1;35m", "TRACE"),
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
            let (colour, tag) = Self::style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "{}{} {} {}\x1B[0m", colour, now, tag, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> Result<()> {
    // Trace is the ceiling; the effective level is set through log::set_max_level
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    if let Commands::Completions { shell } = cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "lectern", &mut std::io::stdout());
        return Ok(());
    }

    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &cli.log_level {
        let level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    let config = Config::load_or_create(&cli.config_path)?;
    config
        .validate()
        .context("Configuration validation failed")?;

    if cli.log_level.is_none() {
        log::set_max_level(config.log_level.to_level_filter());
    }

    match cli.command {
        Commands::Extract(args) => run_extract(&config, args),
        Commands::CleanJson(args) => run_clean_json(args),
        Commands::Completions { .. } => Ok(()),
    }
}

fn run_extract(config: &Config, args: ExtractArgs) -> Result<()> {
    if FileManager::dir_exists(&args.input_path) {
        if args.output.is_some() {
            return Err(anyhow!("--output cannot be used with a directory input"));
        }
        return extract_folder(config, &args.input_path, args.stats, args.force_overwrite);
    }

    if !FileManager::file_exists(&args.input_path) {
        return Err(anyhow!(
            "Transcript file '{}' not found",
            args.input_path.display()
        ));
    }

    let raw = FileManager::read_to_string(&args.input_path)?;
    let extracted = extract_meaningful_content(&raw);
    let summary = ContentSummary::compare(&raw, &extracted);
    debug!(
        "Extracted {} of {} characters from {:?}",
        summary.extracted_chars, summary.original_chars, args.input_path
    );

    match &args.output {
        Some(output) => {
            if output.exists() && !args.force_overwrite {
                return Err(anyhow!(
                    "Output file already exists: {:?}. Use -f to force overwrite.",
                    output
                ));
            }
            FileManager::write_to_file(output, &extracted)?;
            info!("Success: {:?}", output);
        }
        None if !args.stats => println!("{}", extracted),
        None => {}
    }

    if args.stats {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }

    Ok(())
}

// @processes: Every transcript below a directory, writing `<stem>.<suffix>.<ext>` next to each
fn extract_folder(config: &Config, input_dir: &Path, stats: bool, force_overwrite: bool) -> Result<()> {
    let extension = &config.extraction.file_extension;
    let suffix = &config.extraction.output_suffix;
    let output_marker = format!(".{}", suffix);

    let files: Vec<PathBuf> = FileManager::find_files(input_dir, extension)?
        .into_iter()
        .filter(|path| {
            !path
                .file_stem()
                .is_some_and(|stem| stem.to_string_lossy().ends_with(&output_marker))
        })
        .collect();

    if files.is_empty() {
        warn!("No .{} transcripts found in {:?}", extension, input_dir);
        return Ok(());
    }

    info!("Extracting {} transcript(s) from {:?}", files.len(), input_dir);

    let progress_bar = ProgressBar::new(files.len() as u64);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%) {msg}")
        .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    progress_bar.set_style(style.progress_chars("=> "));

    let mut summaries = Vec::new();
    let mut success_count = 0;
    let mut skipped_count = 0;
    let mut error_count = 0;

    for path in &files {
        progress_bar.set_message(
            path.file_name()
                .map(|name| name.to_string_lossy().to_string())
                .unwrap_or_default(),
        );

        let output_dir = path.parent().unwrap_or(Path::new("."));
        let output_path = FileManager::generate_output_path(path, output_dir, suffix, extension);

        if output_path.exists() && !force_overwrite {
            progress_bar.suspend(|| {
                warn!("Output file already exists: {:?}. Use -f to force overwrite.", output_path)
            });
            skipped_count += 1;
            progress_bar.inc(1);
            continue;
        }

        match extract_file(path, &output_path) {
            Ok(summary) => {
                success_count += 1;
                summaries.push(summary);
            }
            Err(e) => {
                progress_bar.suspend(|| error!("Error processing {:?}: {:#}", path, e));
                error_count += 1;
            }
        }
        progress_bar.inc(1);
    }

    progress_bar.finish_with_message("Done");
    info!(
        "Finished: {} extracted, {} skipped, {} failed",
        success_count, skipped_count, error_count
    );

    if stats {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
    }

    if error_count > 0 {
        return Err(anyhow!("{} transcript(s) could not be processed", error_count));
    }

    Ok(())
}

fn extract_file(input: &Path, output: &Path) -> Result<ContentSummary> {
    let raw = FileManager::read_to_string(input)?;
    let extracted = extract_meaningful_content(&raw);
    FileManager::write_to_file(output, &extracted)?;
    Ok(ContentSummary::compare(&raw, &extracted))
}

fn run_clean_json(args: CleanJsonArgs) -> Result<()> {
    let raw = match &args.input_path {
        Some(path) => {
            if !FileManager::file_exists(path) {
                return Err(anyhow!("Reply file '{}' not found", path.display()));
            }
            FileManager::read_to_string(path)?
        }
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read reply from stdin")?;
            buffer
        }
    };

    let cleaned = clean_json_response(&raw);
    serde_json::from_str::<serde_json::Value>(&cleaned)
        .with_context(|| format!("Reply did not contain a valid JSON object: {}", cleaned))?;

    println!("{}", cleaned);
    Ok(())
}
