use anyhow::{anyhow, Context, Result};
use log::{warn, LevelFilter};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    /// Transcript extraction settings
    #[serde(default)]
    pub extraction: ExtractionConfig,

    /// Model generation settings
    #[serde(default)]
    pub generation: GenerationConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Settings for transcript extraction
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ExtractionConfig {
    /// Extension of transcript files picked up when a directory is given
    #[serde(default = "default_file_extension")]
    pub file_extension: String,

    /// Suffix inserted before the extension of extracted output files
    #[serde(default = "default_output_suffix")]
    pub output_suffix: String,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            file_extension: default_file_extension(),
            output_suffix: default_output_suffix(),
        }
    }
}

/// Settings for exercise generation and its retry behaviour
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct GenerationConfig {
    /// Model name
    #[serde(default = "default_model")]
    pub model: String,

    /// Temperature for exercise generation
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Temperature for learning-plan design, slightly higher for variety
    #[serde(default = "default_planning_temperature")]
    pub planning_temperature: f32,

    /// Fewest exercises to request when no objectives are given
    #[serde(default = "default_min_exercises")]
    pub min_exercises: u32,

    /// Most exercises to request when no objectives are given
    #[serde(default = "default_max_exercises")]
    pub max_exercises: u32,

    /// Attempts per generation before giving up
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Backoff unit in milliseconds, doubled after each failed attempt
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            temperature: default_temperature(),
            planning_temperature: default_planning_temperature(),
            min_exercises: default_min_exercises(),
            max_exercises: default_max_exercises(),
            max_attempts: default_max_attempts(),
            retry_backoff_ms: default_retry_backoff_ms(),
        }
    }
}

impl GenerationConfig {
    /// Temperature actually sent to the model.
    ///
    /// `gpt-5` family models only accept a temperature of 1.
    pub fn effective_temperature(&self) -> f32 {
        if self.model.starts_with("gpt-5") {
            if self.temperature != 0.0 && self.temperature != 1.0 {
                warn!(
                    "{} only supports temperature=1, adjusting from {}",
                    self.model, self.temperature
                );
            }
            1.0
        } else {
            self.temperature
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
    // @returns: Matching filter for the log facade
    pub fn to_level_filter(&self) -> LevelFilter {
        match self {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

fn default_file_extension() -> String {
    "md".to_string()
}

fn default_output_suffix() -> String {
    "clean".to_string()
}

fn default_model() -> String {
    "gpt-4o".to_string()
}

fn default_temperature() -> f32 {
    0.0
}

fn default_planning_temperature() -> f32 {
    0.3
}

fn default_min_exercises() -> u32 {
    2
}

fn default_max_exercises() -> u32 {
    4
}

fn default_max_attempts() -> u32 {
    3
}

fn default_retry_backoff_ms() -> u64 {
    1000 // 1 second base backoff time, doubled on each retry
}

impl Config {
    /// Load configuration from a JSON file, writing a default one if it is missing
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if path.exists() {
            let file = File::open(path)
                .with_context(|| format!("Failed to open config file: {}", path.display()))?;
            let reader = BufReader::new(file);
            let config: Config = serde_json::from_reader(reader)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
            return Ok(config);
        }

        warn!("Config file not found at '{}', creating default config.", path.display());
        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;
        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write default config to file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        let generation = &self.generation;

        if generation.model.trim().is_empty() {
            return Err(anyhow!("A model name is required"));
        }

        if generation.max_attempts == 0 {
            return Err(anyhow!("max_attempts must be at least 1"));
        }

        if generation.min_exercises == 0 {
            return Err(anyhow!("min_exercises must be at least 1"));
        }

        if generation.min_exercises > generation.max_exercises {
            return Err(anyhow!(
                "min_exercises ({}) cannot exceed max_exercises ({})",
                generation.min_exercises,
                generation.max_exercises
            ));
        }

        for (name, value) in [
            ("temperature", generation.temperature),
            ("planning_temperature", generation.planning_temperature),
        ] {
            if !(0.0..=2.0).contains(&value) {
                return Err(anyhow!("{} must be between 0.0 and 2.0, got {}", name, value));
            }
        }

        if self.extraction.file_extension.trim().is_empty() {
            return Err(anyhow!("file_extension cannot be empty"));
        }

        if self.extraction.output_suffix.trim().is_empty() {
            return Err(anyhow!("output_suffix cannot be empty"));
        }

        Ok(())
    }
}
