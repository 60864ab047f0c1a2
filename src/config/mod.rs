//! Configuration loading and validation.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::schedule::Seeding;
use crate::standings::TieBreakMode;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Fixture generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// Shuffle the roster before pairing
    #[serde(default = "default_shuffle")]
    pub shuffle: bool,

    /// Fixed RNG seed for reproducible shuffles
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_shuffle() -> bool {
    true
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            shuffle: default_shuffle(),
            seed: None,
        }
    }
}

/// Standings settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StandingsConfig {
    #[serde(default)]
    pub tie_break: TieBreakMode,
}

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeagueConfig {
    /// Where the league snapshot is kept
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub schedule: ScheduleConfig,

    #[serde(default)]
    pub standings: StandingsConfig,
}

fn default_data_file() -> PathBuf {
    PathBuf::from("./league.json")
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LeagueConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            log_level: default_log_level(),
            schedule: ScheduleConfig::default(),
            standings: StandingsConfig::default(),
        }
    }
}

impl LeagueConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: LeagueConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.data_file.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError(
                "data_file must not be empty".to_string(),
            ));
        }

        if !LOG_LEVELS.contains(&self.log_level.to_ascii_lowercase().as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "Unknown log level '{}', expected one of {}",
                self.log_level,
                LOG_LEVELS.join(", ")
            )));
        }

        Ok(())
    }

    /// Seeding policy for the schedule generator.
    pub fn seeding(&self) -> Seeding {
        match (self.schedule.shuffle, self.schedule.seed) {
            (false, _) => Seeding::AsGiven,
            (true, Some(seed)) => Seeding::Seeded(seed),
            (true, None) => Seeding::Shuffle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LeagueConfig::default();

        assert_eq!(config.data_file, PathBuf::from("./league.json"));
        assert_eq!(config.log_level, "info");
        assert!(config.schedule.shuffle);
        assert_eq!(config.standings.tie_break, TieBreakMode::Pairwise);
        assert_eq!(config.seeding(), Seeding::Shuffle);
    }

    #[test]
    fn test_config_validation_ok() {
        assert!(LeagueConfig::default().validate().is_ok());
    }

    #[test]
    fn test_config_validation_bad_log_level() {
        let config = LeagueConfig {
            log_level: "loud".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_config_validation_empty_data_file() {
        let config = LeagueConfig {
            data_file: PathBuf::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_seeding_from_schedule_section() {
        let mut config = LeagueConfig::default();
        config.schedule.seed = Some(17);
        assert_eq!(config.seeding(), Seeding::Seeded(17));

        config.schedule.shuffle = false;
        assert_eq!(config.seeding(), Seeding::AsGiven);
    }

    #[test]
    fn test_parse_partial_toml() {
        let config: LeagueConfig = toml::from_str(
            r#"
            log_level = "debug"

            [standings]
            tie_break = "mini_table"
            "#,
        )
        .unwrap();

        assert_eq!(config.log_level, "debug");
        assert_eq!(config.standings.tie_break, TieBreakMode::MiniTable);
        assert!(config.schedule.shuffle);
        assert_eq!(config.data_file, PathBuf::from("./league.json"));
    }

    #[test]
    fn test_config_serialization() {
        let config = LeagueConfig::default();
        let toml_str = toml::to_string(&config).unwrap();

        let parsed: LeagueConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(config.data_file, parsed.data_file);
        assert_eq!(config.standings.tie_break, parsed.standings.tie_break);
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = LeagueConfig::load_or_default(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_from_file_rejects_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("league.toml");
        std::fs::write(&path, "log_level = \"shouty\"\n").unwrap();
        assert!(matches!(
            LeagueConfig::from_file(&path),
            Err(ConfigError::ValidationError(_))
        ));
    }
}
