//! Configuration management for the voxgate CLI.
//!
//! Configuration is stored in ~/.voxgate/config.yaml

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use voxgate_voiceprint::{MatchConfig, MfccConfig, DEFAULT_THRESHOLD};

use crate::paths::Paths;

/// CLI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Maximum voiceprint distance accepted as a match.
    #[serde(default = "default_threshold")]
    pub threshold: f64,

    /// Directory holding canonical enrollment audio (default: ~/.voxgate/data).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,

    /// MFCC extraction overrides. Both samples of a comparison always use
    /// the same settings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mfcc: Option<MfccConfig>,

    /// Path to the config file (not serialized).
    #[serde(skip)]
    config_path: PathBuf,
}

fn default_threshold() -> f64 {
    DEFAULT_THRESHOLD
}

impl Default for Config {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            data_dir: None,
            mfcc: None,
            config_path: PathBuf::new(),
        }
    }
}

impl Config {
    /// Returns the config file path.
    pub fn path(&self) -> &Path {
        &self.config_path
    }

    /// Returns the directory holding the config file.
    pub fn dir(&self) -> &Path {
        self.config_path.parent().unwrap_or_else(|| Path::new("."))
    }

    /// Directory for canonical enrollment audio.
    pub fn data_dir(&self) -> PathBuf {
        match &self.data_dir {
            Some(dir) => dir.clone(),
            None => Paths::with_base(self.dir()).data_dir(),
        }
    }

    /// Path of the enrollment registry next to the config file.
    pub fn registry_path(&self) -> PathBuf {
        Paths::with_base(self.dir()).registry_file()
    }

    /// Matcher settings, with an optional threshold override.
    pub fn match_config(&self, threshold: Option<f64>) -> MatchConfig {
        MatchConfig::with_threshold(threshold.unwrap_or(self.threshold))
    }

    /// Sets a configuration value by key.
    pub fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        match key {
            "threshold" => {
                let threshold: f64 = value
                    .parse()
                    .map_err(|_| anyhow::anyhow!("threshold must be a number, got '{}'", value))?;
                validate_threshold(threshold)?;
                self.threshold = threshold;
            }
            "data_dir" => {
                self.data_dir = if value.is_empty() {
                    None
                } else {
                    Some(PathBuf::from(value))
                };
            }
            _ => anyhow::bail!("unknown config key '{}' (expected threshold or data_dir)", key),
        }
        Ok(())
    }

    /// Saves the configuration to disk.
    pub fn save(&self) -> anyhow::Result<()> {
        if let Some(parent) = self.config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_yaml::to_string(self)?;
        std::fs::write(&self.config_path, content)?;
        Ok(())
    }
}

/// Rejects negative or non-finite thresholds.
pub fn validate_threshold(threshold: f64) -> anyhow::Result<()> {
    if !threshold.is_finite() || threshold < 0.0 {
        anyhow::bail!("threshold must be a non-negative number, got {}", threshold);
    }
    Ok(())
}

/// Loads configuration from `custom_path`, or ~/.voxgate/config.yaml.
///
/// A missing file is created with default values.
pub fn load_config(custom_path: Option<&str>) -> anyhow::Result<Config> {
    let config_path = match custom_path {
        Some(p) => PathBuf::from(p),
        None => Paths::new()?.config_file(),
    };

    let mut cfg = if config_path.exists() {
        let content = std::fs::read_to_string(&config_path)?;
        if content.trim().is_empty() {
            Config::default()
        } else {
            serde_yaml::from_str(&content)?
        }
    } else {
        Config::default()
    };
    validate_threshold(cfg.threshold)?;

    cfg.config_path = config_path;
    if !cfg.config_path.exists() {
        cfg.save()?;
    }

    Ok(cfg)
}
