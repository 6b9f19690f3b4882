//! Configuration management for the job matcher
//!
//! Scoring weights and band thresholds are fixed constants of the matcher and
//! intentionally have no entry here.

use crate::error::{MatcherError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub matching: MatchingConfig,
    pub input: InputConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchingConfig {
    /// Number of ranked jobs reported when the CLI gets no `--top-k`
    pub top_k: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputConfig {
    pub enable_cache: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            matching: MatchingConfig { top_k: 5 },
            input: InputConfig { enable_cache: true },
            output: OutputConfig {
                format: OutputFormat::Console,
                detailed: false,
                color_output: true,
            },
        }
    }
}

impl Config {
    /// Load from the default location, writing defaults on first run
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = Self::default();
            config.save_to(&config_path)?;
            Ok(config)
        }
    }

    /// Load from an explicit file; a missing file is an error
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(MatcherError::Configuration(format!(
                "Config file does not exist: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| MatcherError::Configuration(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| MatcherError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("job-matcher")
            .join("config.toml")
    }

    fn validate(&self) -> Result<()> {
        if self.matching.top_k == 0 {
            return Err(MatcherError::Configuration(
                "matching.top_k must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
