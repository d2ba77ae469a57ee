//! Engine configuration loaded from TOML.

use std::{
    fs, io,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::{Deserialize, Serialize};
use siege_core::DamageOverTimeModel;
use thiserror::Error;

/// Tuning parameters for a whole session.
///
/// Every field is optional in TOML; missing keys fall back to [`EngineConfig::default`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Gold available when a session starts.
    pub starting_gold: u32,
    /// Lives available when a session or level starts.
    pub starting_lives: u32,
    /// Highest player level experience may reach.
    pub max_player_level: u32,
    /// Level whose completion ends the campaign in victory.
    pub final_level: u32,
    /// Longest frame delta a single step accepts, in milliseconds.
    ///
    /// `None` or zero disables the clamp.
    pub max_frame_delta_ms: Option<u64>,
    /// How burn and poison convert elapsed time into damage.
    pub damage_over_time: DamageOverTimeModel,
    /// Seed for the stochastic damage-over-time model.
    pub rng_seed: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            starting_gold: 150,
            starting_lives: 25,
            max_player_level: 50,
            final_level: 20,
            max_frame_delta_ms: Some(100),
            damage_over_time: DamageOverTimeModel::Periodic,
            rng_seed: 0,
        }
    }
}

impl EngineConfig {
    /// Parses a configuration from TOML source text.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    /// Reads and parses a TOML configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadFailed {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Frame delta clamp, if enabled.
    #[must_use]
    pub fn max_frame_delta(&self) -> Option<Duration> {
        self.max_frame_delta_ms
            .filter(|millis| *millis > 0)
            .map(Duration::from_millis)
    }

    pub(crate) fn world_config(&self) -> siege_world::Config {
        siege_world::Config {
            starting_gold: self.starting_gold,
            starting_lives: self.starting_lives,
            max_player_level: self.max_player_level,
            final_level: self.final_level,
        }
    }

    pub(crate) fn movement_config(&self) -> siege_system_movement::Config {
        siege_system_movement::Config::new(self.damage_over_time, self.rng_seed)
    }
}

/// Errors raised while loading an [`EngineConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read engine config from {path:?}: {source}")]
    ReadFailed {
        /// File that was requested.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The configuration text is not valid TOML for [`EngineConfig`].
    #[error("failed to parse engine config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_use_defaults() {
        let config = EngineConfig::from_toml_str("starting_gold = 500\n").expect("valid toml");
        assert_eq!(config.starting_gold, 500);
        assert_eq!(config.starting_lives, 25);
        assert_eq!(config.max_frame_delta(), Some(Duration::from_millis(100)));
    }

    #[test]
    fn full_configuration_parses() {
        let source = r#"
            starting_gold = 300
            starting_lives = 10
            max_player_level = 5
            final_level = 3
            max_frame_delta_ms = 0
            damage_over_time = "stochastic"
            rng_seed = 42
        "#;
        let config = EngineConfig::from_toml_str(source).expect("valid toml");
        assert_eq!(
            config,
            EngineConfig {
                starting_gold: 300,
                starting_lives: 10,
                max_player_level: 5,
                final_level: 3,
                max_frame_delta_ms: Some(0),
                damage_over_time: DamageOverTimeModel::Stochastic,
                rng_seed: 42,
            }
        );
        assert_eq!(config.max_frame_delta(), None);
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let error = EngineConfig::from_toml_str("starting_gold = \"lots\"").unwrap_err();
        assert!(matches!(error, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_reports_its_path() {
        let error = EngineConfig::from_file("/definitely/not/here.toml").unwrap_err();
        match error {
            ConfigError::ReadFailed { path, .. } => {
                assert_eq!(path, PathBuf::from("/definitely/not/here.toml"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
