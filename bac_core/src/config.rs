//! Configuration file support for callers of the estimator.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/bac-estimator/config.toml`.
//! It only supplies a default profile and output preferences; the model
//! constants are never configurable.

use crate::{Error, Result, Sex, StomachState, Subject};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub profile: ProfileConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

/// Default subject and stomach state
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ProfileConfig {
    #[serde(default)]
    pub weight_kg: Option<f64>,

    #[serde(default)]
    pub sex: Option<Sex>,

    #[serde(default = "default_stomach")]
    pub stomach: StomachState,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            weight_kg: None,
            sex: None,
            stomach: default_stomach(),
        }
    }
}

/// Output rendering
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
}

fn default_stomach() -> StomachState {
    StomachState::Full
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        match Self::default_config_path() {
            Some(config_path) if config_path.exists() => Self::load_from(&config_path),
            config_path => {
                tracing::info!(
                    "No config file found at {:?}, using defaults",
                    config_path
                );
                Ok(Self::default())
            }
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.profile.validate()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path, if the platform has a config dir
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|base| base.join("bac-estimator").join("config.toml"))
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }

    /// Build the profile subject, with optional overrides taking precedence
    pub fn subject(&self, weight_kg: Option<f64>, sex: Option<Sex>) -> Result<Subject> {
        let weight = weight_kg.or(self.profile.weight_kg).ok_or_else(|| {
            Error::Config("no body weight given and none set in the profile".into())
        })?;
        let sex = sex
            .or(self.profile.sex)
            .ok_or_else(|| Error::Config("no sex given and none set in the profile".into()))?;
        Subject::new(weight, sex)
    }
}

impl ProfileConfig {
    fn validate(&self) -> Result<()> {
        match self.weight_kg {
            Some(w) if !w.is_finite() || w <= 0.0 => Err(Error::Config(format!(
                "profile weight_kg must be positive, got {}",
                w
            ))),
            _ => Ok(()),
        }
    }
}
