//! Simulation tuning configuration.
//!
//! Knobs that hosts may want to adjust without recompiling, loadable from a
//! RON file. Gameplay balance numbers stay in `balance`; this covers the
//! operational side of the simulation.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::DEFAULT_PATH_COOLDOWN;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] ron::error::SpannedError),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimConfig {
    /// Seconds an enemy waits before re-requesting a path.
    pub path_cooldown: f32,
    /// Seed feeding deterministic wave composition.
    pub wave_seed: u64,
    /// Seconds between consecutive spawns within one wave.
    pub wave_spacing: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            path_cooldown: DEFAULT_PATH_COOLDOWN,
            wave_seed: 42,
            wave_spacing: 0.8,
        }
    }
}

impl SimConfig {
    pub fn from_ron_str(text: &str) -> Result<Self, ConfigError> {
        Ok(ron::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_ron_str(&fs::read_to_string(path)?)
    }

    pub fn to_ron_string(&self) -> String {
        ron::to_string(self).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = SimConfig::default();
        assert!((config.path_cooldown - 2.0).abs() < f32::EPSILON);
        assert_eq!(config.wave_seed, 42);
    }

    #[test]
    fn test_partial_ron_fills_defaults() {
        let config = SimConfig::from_ron_str("(path_cooldown: 5.0)").unwrap();
        assert!((config.path_cooldown - 5.0).abs() < f32::EPSILON);
        assert_eq!(config.wave_seed, SimConfig::default().wave_seed);
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(SimConfig::from_ron_str("(tick_rate: 60)").is_err());
    }

    #[test]
    fn test_ron_roundtrip() {
        let config = SimConfig {
            path_cooldown: 1.5,
            wave_seed: 7,
            wave_spacing: 0.25,
        };
        let restored = SimConfig::from_ron_str(&config.to_ron_string()).unwrap();
        assert_eq!(restored, config);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "(wave_seed: 99, wave_spacing: 0.5)").unwrap();
        let config = SimConfig::load(file.path()).unwrap();
        assert_eq!(config.wave_seed, 99);
        assert!((config.wave_spacing - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_load_missing_file() {
        assert!(matches!(
            SimConfig::load("/nonexistent/gridwave.ron"),
            Err(ConfigError::Io(_))
        ));
    }
}
