//! Game settings
//!
//! Start-up options plus the gameplay rules. Every field has a default, so a
//! settings file only needs the values it changes.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::sim::Rules;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Fixed run seed; the host clock is used when absent
    pub seed: Option<u64>,
    pub rules: Rules,
    /// `env_logger` filter (native only); `RUST_LOG` wins when set
    pub log_filter: Option<String>,
    /// Ticks the headless native runner plays
    pub demo_ticks: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            rules: Rules::default(),
            log_filter: None,
            demo_ticks: 400,
        }
    }
}

impl Settings {
    /// Parse and validate settings JSON
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.rules.validate()
    }

    /// Seed to use for a new session
    pub fn seed_or(&self, fallback: u64) -> u64 {
        self.seed.unwrap_or(fallback)
    }

    /// Load settings from a JSON file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }
}
