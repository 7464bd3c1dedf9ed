use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Alignment tuning
    #[serde(default)]
    pub alignment: AlignmentConfig,

    /// Segmentation tuning
    #[serde(default)]
    pub segmentation: SegmentationConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Tuning knobs of the anchor-refinement pass. Both values are heuristics
/// without a derivation, which is exactly why they live in configuration.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AlignmentConfig {
    /// Fraction of a candidate stretch's own width added on each side
    /// before word matching, to tolerate interpolation imprecision
    #[serde(default = "default_stretch_expansion")]
    pub stretch_expansion: f64,

    /// Minimum fraction of a caption's words that must match before the
    /// caption is allowed to contribute an anchor
    #[serde(default = "default_match_threshold")]
    pub match_threshold: f64,
}

impl Default for AlignmentConfig {
    fn default() -> Self {
        Self {
            stretch_expansion: default_stretch_expansion(),
            match_threshold: default_match_threshold(),
        }
    }
}

/// Tuning knobs of the caption re-segmentation pass
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SegmentationConfig {
    /// Soft maximum caption length in characters; longer sentences are cut
    /// at 70% of this budget, and a caption wider than half of it is folded
    /// into two visual lines
    #[serde(default = "default_max_caption_length")]
    pub max_caption_length: usize,
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        Self {
            max_caption_length: default_max_caption_length(),
        }
    }
}

fn default_stretch_expansion() -> f64 {
    0.3
}

fn default_match_threshold() -> f64 {
    0.5
}

fn default_max_caption_length() -> usize {
    50
}

/// Log level configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    // @level: Error
    Error,
    // @level: Warn
    Warn,
    // @level: Info (default)
    #[default]
    Info,
    // @level: Debug
    Debug,
    // @level: Trace
    Trace,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        };
        write!(f, "{}", s)
    }
}

impl std::str::FromStr for LogLevel {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "error" => Ok(Self::Error),
            "warn" => Ok(Self::Warn),
            "info" => Ok(Self::Info),
            "debug" => Ok(Self::Debug),
            "trace" => Ok(Self::Trace),
            _ => Err(anyhow!("Invalid log level: {}", s)),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            alignment: AlignmentConfig::default(),
            segmentation: SegmentationConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration values
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=2.0).contains(&self.alignment.stretch_expansion) {
            return Err(anyhow!(
                "Invalid stretch_expansion {}: must be within [0.0, 2.0]",
                self.alignment.stretch_expansion
            ));
        }

        if !(0.0..=1.0).contains(&self.alignment.match_threshold)
            || self.alignment.match_threshold == 0.0
        {
            return Err(anyhow!(
                "Invalid match_threshold {}: must be within (0.0, 1.0]",
                self.alignment.match_threshold
            ));
        }

        if self.segmentation.max_caption_length < 10 {
            return Err(anyhow!(
                "Invalid max_caption_length {}: must be at least 10",
                self.segmentation.max_caption_length
            ));
        }

        Ok(())
    }
}
