//! # skx-config
//!
//! Layered configuration loading for the skill-exchange engine using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`SKX_*` prefix, `__` as separator)
//! 2. Project-level `.skx/config.toml`
//! 3. User-level `~/.config/skx/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `SKX_REWARD__RATE` -> `reward.rate`, `SKX_DATABASE__PATH` ->
//! `database.path`, etc. The `__` (double underscore) separates nested
//! config sections.
//!
//! # Usage
//!
//! ```no_run
//! use skx_config::SkxConfig;
//!
//! let config = SkxConfig::load_with_dotenv().expect("config");
//! println!("{} tokens per {}", config.reward.rate, config.reward.unit);
//! ```

mod connection;
mod database;
mod error;
mod matching;
mod reward;

pub use connection::ConnectionConfig;
pub use database::DatabaseConfig;
pub use error::ConfigError;
pub use matching::MatchingConfig;
pub use reward::{MAX_RATING, MIN_RATING, RewardConfig};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SkxConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub reward: RewardConfig,
    #[serde(default)]
    pub matching: MatchingConfig,
    #[serde(default)]
    pub connection: ConnectionConfig,
}

impl SkxConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need
    /// `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if extraction fails or a value is out of range.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(&Self::figment())
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if extraction fails or a value is out of range.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Extract and validate from an arbitrary figment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if extraction fails or a value is out of range.
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests and the CLI can layer extra providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        let local_path = PathBuf::from(".skx/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("SKX_").split("__"))
    }

    /// Reject values the engine cannot operate with.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.reward.threshold_in_range() {
            return Err(ConfigError::InvalidValue {
                field: "reward.threshold".into(),
                reason: format!(
                    "{} is outside {MIN_RATING}..={MAX_RATING}",
                    self.reward.threshold
                ),
            });
        }
        if self.matching.default_limit == 0 {
            return Err(ConfigError::InvalidValue {
                field: "matching.default_limit".into(),
                reason: "must be at least 1".into(),
            });
        }
        if self.database.path.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "database.path".into(),
                reason: "must not be empty".into(),
            });
        }
        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("skx").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = SkxConfig::default();
        config.validate().expect("defaults validate");
        assert_eq!(config.reward.rate, 2);
        assert_eq!(config.matching.min_score, 0);
        assert_eq!(config.matching.default_limit, 20);
        assert_eq!(
            config.connection.default_message,
            "I'd like to connect with you!"
        );
    }

    #[test]
    fn figment_builds_without_files() {
        let config: SkxConfig = SkxConfig::figment()
            .extract()
            .expect("should extract defaults");
        assert_eq!(config.database.path, "skx.db");
    }

    #[test]
    fn validate_rejects_zero_limit() {
        let mut config = SkxConfig::default();
        config.matching.default_limit = 0;
        let err = config.validate().unwrap_err();
        assert!(
            matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "matching.default_limit")
        );
    }
}
