//! Service Configuration
//!
//! Layered from an optional TOML file and `VALUATION__*` environment
//! variables, e.g. `VALUATION__MODEL__ARTIFACT_PATH=/srv/model.json`.

use data_validator::ValidationConfig;
use feature_engine::{DefaultTable, FeatureValue, Field, SchemaError};
use inference_engine::CurrencyFormat;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use thiserror::Error;
use tracing::Level;

/// Environment variable naming the config file
pub const CONFIG_PATH_ENV: &str = "VALUATION_CONFIG";

/// Config file used when none is named
pub const DEFAULT_CONFIG_FILE: &str = "valuation.toml";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration error: {0}")]
    Load(#[from] config::ConfigError),
    #[error("Invalid default table: {0}")]
    Defaults(#[from] SchemaError),
    #[error("Invalid log level: {0}")]
    LogLevel(String),
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Listen address
    pub bind_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Model artifact settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Path of the JSON model artifact
    pub artifact_path: PathBuf,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            artifact_path: PathBuf::from("models/valuation_model.json"),
        }
    }
}

/// `VALUATION__*` variables. Values are parsed so numeric defaults stay numeric.
fn environment() -> config::Environment {
    config::Environment::with_prefix("VALUATION")
        .separator("__")
        .try_parsing(true)
}

/// Top-level service configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub model: ModelConfig,
    pub currency: CurrencyFormat,
    pub validation: ValidationConfig,
    /// Overrides applied on top of the built-in default table
    pub defaults: BTreeMap<Field, FeatureValue>,
    /// Maximum log level (trace, debug, info, warn, error)
    pub log_level: Option<String>,
}

impl AppConfig {
    /// Load configuration. The file is `path`, else `$VALUATION_CONFIG`, else
    /// `valuation.toml`; a missing file is not an error.
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        let file = path
            .map(str::to_string)
            .or_else(|| std::env::var(CONFIG_PATH_ENV).ok())
            .unwrap_or_else(|| DEFAULT_CONFIG_FILE.to_string());

        Self::load_with_env(&file, environment())
    }

    fn load_with_env(file: &str, env: config::Environment) -> Result<Self, ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(file).required(false))
            .add_source(env)
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Built-in default table with configured overrides applied
    pub fn default_table(&self) -> Result<DefaultTable, ConfigError> {
        Ok(DefaultTable::builtin().with_overrides(self.defaults.clone())?)
    }

    /// Parsed log level, `info` when unset
    pub fn log_level(&self) -> Result<Level, ConfigError> {
        match &self.log_level {
            None => Ok(Level::INFO),
            Some(level) => level
                .parse()
                .map_err(|_| ConfigError::LogLevel(level.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_sources() {
        let config = AppConfig::load(Some("/nonexistent/valuation")).unwrap();
        assert_eq!(config.server.bind_addr, "0.0.0.0:8080");
        assert_eq!(config.validation, ValidationConfig::default());
        assert_eq!(config.log_level().unwrap(), Level::INFO);
        assert_eq!(config.default_table().unwrap(), DefaultTable::builtin());
    }

    fn load_with_vars(vars: &[(&str, &str)]) -> AppConfig {
        let env = environment().source(Some(
            vars.iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        ));
        AppConfig::load_with_env("/nonexistent/valuation", env).unwrap()
    }

    #[test]
    fn test_numeric_default_from_env() {
        let config = load_with_vars(&[
            ("VALUATION__DEFAULTS__POPULARITY", "2000"),
            ("VALUATION__DEFAULTS__MARKET", "Familiar"),
        ]);

        assert_eq!(
            config.defaults.get(&Field::Popularity),
            Some(&FeatureValue::Numeric(2000.0))
        );
        let table = config.default_table().unwrap();
        assert_eq!(table.get(Field::Popularity), Some(&FeatureValue::from(2000)));
        assert_eq!(table.get(Field::Market), Some(&FeatureValue::from("Familiar")));
    }

    #[test]
    fn test_env_overrides_sections() {
        let config = load_with_vars(&[
            ("VALUATION__SERVER__BIND_ADDR", "127.0.0.1:9000"),
            ("VALUATION__VALIDATION__POWER_STEP", "5"),
            ("VALUATION__LOG_LEVEL", "debug"),
        ]);

        assert_eq!(config.server.bind_addr, "127.0.0.1:9000");
        assert_eq!(config.validation.power_step, 5);
        assert_eq!(config.log_level().unwrap(), Level::DEBUG);
    }

    #[test]
    fn test_default_overrides() {
        let config = AppConfig {
            defaults: BTreeMap::from([(Field::Market, FeatureValue::from("Familiar"))]),
            ..Default::default()
        };
        let table = config.default_table().unwrap();
        assert_eq!(table.get(Field::Market), Some(&FeatureValue::from("Familiar")));
    }

    #[test]
    fn test_bad_default_override() {
        let config = AppConfig {
            defaults: BTreeMap::from([(Field::Doors, FeatureValue::from("four"))]),
            ..Default::default()
        };
        assert!(matches!(config.default_table(), Err(ConfigError::Defaults(_))));
    }

    #[test]
    fn test_bad_log_level() {
        let config = AppConfig {
            log_level: Some("loud".to_string()),
            ..Default::default()
        };
        assert!(matches!(config.log_level(), Err(ConfigError::LogLevel(_))));
    }
}
