//! Engine configuration.
//!
//! Loaded from TOML; every field is optional and falls back to the engine's
//! named defaults:
//!
//! ```toml
//! winner_threshold = 95.0
//! min_sample_size  = 10
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::engine::significance::MIN_SAMPLE_SIZE;
use crate::engine::winner::WINNER_SIGNIFICANCE_THRESHOLD;
use crate::error::ConfigError;

/// Tunable decision parameters of the statistics engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// A variant must exceed this chance to beat control (0–100) to win.
    pub winner_threshold: f64,
    /// Both arms need at least this many visitors before significance is
    /// estimated at all.
    pub min_sample_size: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            winner_threshold: WINNER_SIGNIFICANCE_THRESHOLD,
            min_sample_size: MIN_SAMPLE_SIZE,
        }
    }
}

impl EngineConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let cfg: Self = toml::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse and validate a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..100.0).contains(&self.winner_threshold) {
            return Err(ConfigError::Invalid(format!(
                "winner_threshold must be in [0, 100), got {}",
                self.winner_threshold
            )));
        }
        if self.min_sample_size == 0 {
            return Err(ConfigError::Invalid("min_sample_size must be >= 1".into()));
        }
        Ok(())
    }
}
