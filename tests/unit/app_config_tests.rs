/*!
 * Tests for app configuration
 */

use std::str::FromStr;

use subrefine::app_config::{Config, LogLevel};

/// Test configuration defaults
#[test]
fn test_default_config_shouldCarryDocumentedDefaults() {
    let config = Config::default();

    assert!((config.alignment.stretch_expansion - 0.3).abs() < f64::EPSILON);
    assert!((config.alignment.match_threshold - 0.5).abs() < f64::EPSILON);
    assert_eq!(config.segmentation.max_caption_length, 50);
    assert_eq!(config.log_level, LogLevel::Info);
    assert!(config.validate().is_ok());
}

/// Test partial JSON falls back to per-field defaults
#[test]
fn test_from_json_withPartialConfig_shouldFillDefaults() {
    let config = Config::from_json(r#"{"alignment": {"match_threshold": 0.6}}"#).unwrap();

    assert!((config.alignment.match_threshold - 0.6).abs() < f64::EPSILON);
    assert!((config.alignment.stretch_expansion - 0.3).abs() < f64::EPSILON);
    assert_eq!(config.segmentation.max_caption_length, 50);
}

/// Test validation rejects out-of-range tunables
#[test]
fn test_validate_withOutOfRangeValues_shouldFail() {
    let mut config = Config::default();
    config.alignment.match_threshold = 0.0;
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.alignment.match_threshold = 1.5;
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.alignment.stretch_expansion = -0.1;
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.segmentation.max_caption_length = 5;
    assert!(config.validate().is_err());
}

/// Test from_json applies validation
#[test]
fn test_from_json_withInvalidValues_shouldFail() {
    assert!(Config::from_json(r#"{"segmentation": {"max_caption_length": 1}}"#).is_err());
    assert!(Config::from_json("not json").is_err());
}

/// Test log level parsing and display
#[test]
fn test_log_level_withRoundTrip_shouldMatch() {
    for (name, level) in [
        ("error", LogLevel::Error),
        ("warn", LogLevel::Warn),
        ("info", LogLevel::Info),
        ("debug", LogLevel::Debug),
        ("trace", LogLevel::Trace),
    ] {
        assert_eq!(LogLevel::from_str(name).unwrap(), level);
        assert_eq!(level.to_string(), name);
    }

    assert!(LogLevel::from_str("verbose").is_err());
}

/// Test config serialization round trip
#[test]
fn test_config_serde_withDefaultConfig_shouldRoundTrip() {
    let config = Config::default();
    let json = serde_json::to_string_pretty(&config).unwrap();
    let parsed = Config::from_json(&json).unwrap();

    assert_eq!(parsed.segmentation.max_caption_length, config.segmentation.max_caption_length);
    assert_eq!(parsed.log_level, config.log_level);
}
