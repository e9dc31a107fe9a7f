/*!
 * Tests for application configuration functionality
 */

use lectern::app_config::{Config, GenerationConfig, LogLevel};
use log::LevelFilter;

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.extraction.file_extension, "md");
    assert_eq!(config.extraction.output_suffix, "clean");
    assert_eq!(config.generation.model, "gpt-4o");
    assert_eq!(config.generation.temperature, 0.0);
    assert_eq!(config.generation.planning_temperature, 0.3);
    assert_eq!(config.generation.min_exercises, 2);
    assert_eq!(config.generation.max_exercises, 4);
    assert_eq!(config.generation.max_attempts, 3);
    assert_eq!(config.generation.retry_backoff_ms, 1000);
    assert_eq!(config.log_level, LogLevel::Info);
    assert!(config.validate().is_ok());
}

/// Test configuration validation
#[test]
fn test_config_validation_withVariousConfigs_shouldValidateCorrectly() {
    let mut config = Config::default();

    config.generation.model = "  ".to_string();
    assert!(config.validate().is_err());
    config.generation.model = "gpt-4o".to_string();

    config.generation.max_attempts = 0;
    assert!(config.validate().is_err());
    config.generation.max_attempts = 3;

    config.generation.min_exercises = 5;
    assert!(config.validate().is_err());
    config.generation.min_exercises = 2;

    config.generation.temperature = 2.5;
    assert!(config.validate().is_err());
    config.generation.temperature = 0.0;

    config.extraction.output_suffix = String::new();
    assert!(config.validate().is_err());
    config.extraction.output_suffix = "clean".to_string();

    assert!(config.validate().is_ok());
}

/// Test that gpt-5 models are pinned to temperature 1
#[test]
fn test_effective_temperature_withGpt5Model_shouldForceOne() {
    let config = GenerationConfig {
        model: "gpt-5-mini".to_string(),
        temperature: 0.2,
        ..GenerationConfig::default()
    };
    assert_eq!(config.effective_temperature(), 1.0);

    let config = GenerationConfig {
        temperature: 0.2,
        ..GenerationConfig::default()
    };
    assert_eq!(config.effective_temperature(), 0.2);
}

/// Test that a partial JSON document is completed with defaults
#[test]
fn test_deserialize_withPartialJson_shouldFillDefaults() {
    let config: Config =
        serde_json::from_str(r#"{"generation": {"model": "gpt-4o-mini"}, "log_level": "debug"}"#)
            .expect("partial config should parse");

    assert_eq!(config.generation.model, "gpt-4o-mini");
    assert_eq!(config.generation.max_attempts, 3);
    assert_eq!(config.extraction.file_extension, "md");
    assert_eq!(config.log_level.to_level_filter(), LevelFilter::Debug);
}
