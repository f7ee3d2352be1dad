//! # CLI Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Command line flags (highest priority)                              │
//! │     --db ./shop.db                                                     │
//! │                                                                         │
//! │  2. Environment Variables                                              │
//! │     COSTWISE_DB_PATH=./shop.db                                         │
//! │     COSTWISE_CURRENCY_SYMBOL=€                                         │
//! │     COSTWISE_CURRENCY_DECIMALS=2                                       │
//! │     COSTWISE_LOG=costwise=debug                                        │
//! │                                                                         │
//! │  3. TOML Config File (--config, or the platform config dir)            │
//! │     ~/.config/costwise/costwise.toml (Linux)                           │
//! │     ~/Library/Application Support/com.costwise.costwise/... (macOS)    │
//! │                                                                         │
//! │  4. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! database_path = "/home/me/costwise/shop.db"
//! currency_symbol = "€"
//! currency_decimals = 2
//! log_filter = "warn,costwise=info"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

use costwise_core::Money;

const CONFIG_FILE_NAME: &str = "costwise.toml";
const DATABASE_FILE_NAME: &str = "costwise.db";

/// Upper bound for `currency_decimals`.
const MAX_CURRENCY_DECIMALS: usize = 6;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Settings shared by every command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// SQLite file holding the catalogue.
    pub database_path: PathBuf,

    /// Symbol printed in front of every amount.
    pub currency_symbol: String,

    /// Decimals printed for amounts. Results are never rounded, only printed.
    pub currency_decimals: usize,

    /// `EnvFilter` directives. `RUST_LOG` still wins when set.
    pub log_filter: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            database_path: default_database_path(),
            currency_symbol: "$".to_string(),
            currency_decimals: 2,
            log_filter: None,
        }
    }
}

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("com", "costwise", "costwise")
}

fn default_database_path() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.data_dir().join(DATABASE_FILE_NAME))
        .unwrap_or_else(|| PathBuf::from(DATABASE_FILE_NAME))
}

impl AppConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (an explicit path must exist, the default one may not)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let explicit = config_path.is_some();
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() || explicit {
                info!(?path, "Loading config from file");
                config = Self::from_file(&path)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&contents)?)
    }

    /// Applies `COSTWISE_*` overrides read through `lookup`.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(path) = lookup("COSTWISE_DB_PATH") {
            debug!(path = %path, "Overriding database path from environment");
            self.database_path = PathBuf::from(path);
        }

        if let Some(symbol) = lookup("COSTWISE_CURRENCY_SYMBOL") {
            self.currency_symbol = symbol;
        }

        if let Some(decimals) = lookup("COSTWISE_CURRENCY_DECIMALS") {
            match decimals.parse::<usize>() {
                Ok(d) => self.currency_decimals = d,
                Err(_) => warn!(value = %decimals, "Ignoring invalid COSTWISE_CURRENCY_DECIMALS"),
            }
        }

        if let Some(filter) = lookup("COSTWISE_LOG") {
            self.log_filter = Some(filter);
        }
    }

    /// Applies the `--db` flag.
    pub fn with_database_path(mut self, path: Option<PathBuf>) -> Self {
        if let Some(path) = path {
            self.database_path = path;
        }
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database_path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("database_path must not be empty".into()));
        }

        if self.currency_decimals > MAX_CURRENCY_DECIMALS {
            return Err(ConfigError::Invalid(format!(
                "currency_decimals must be at most {}, got {}",
                MAX_CURRENCY_DECIMALS, self.currency_decimals
            )));
        }

        Ok(())
    }

    fn default_config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Formats an amount with the configured currency.
    pub fn money(&self, amount: Money) -> String {
        amount.format_with(&self.currency_symbol, self.currency_decimals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.currency_symbol, "$");
        assert_eq!(config.currency_decimals, 2);
        assert!(config.database_path.ends_with(DATABASE_FILE_NAME));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_explicit_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "database_path = \"/tmp/shop.db\"").unwrap();
        writeln!(file, "currency_symbol = \"€\"").unwrap();

        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(config.database_path, PathBuf::from("/tmp/shop.db"));
        assert_eq!(config.currency_symbol, "€");
        // Missing keys keep their defaults
        assert_eq!(config.currency_decimals, 2);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = AppConfig::load(Some(dir.path().join("nope.toml")));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_malformed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "currency_decimals = \"two\"").unwrap();

        assert!(matches!(
            AppConfig::from_file(file.path()),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_overrides() {
        let vars = env(&[
            ("COSTWISE_DB_PATH", "/data/costwise.db"),
            ("COSTWISE_CURRENCY_SYMBOL", "£"),
            ("COSTWISE_CURRENCY_DECIMALS", "3"),
            ("COSTWISE_LOG", "costwise=trace"),
        ]);

        let mut config = AppConfig::default();
        config.apply_overrides(|key| vars.get(key).cloned());

        assert_eq!(config.database_path, PathBuf::from("/data/costwise.db"));
        assert_eq!(config.currency_symbol, "£");
        assert_eq!(config.currency_decimals, 3);
        assert_eq!(config.log_filter.as_deref(), Some("costwise=trace"));

        let config = config.with_database_path(Some(PathBuf::from("./flag.db")));
        assert_eq!(config.database_path, PathBuf::from("./flag.db"));
    }

    #[test]
    fn test_invalid_decimals_override_is_ignored() {
        let vars = env(&[("COSTWISE_CURRENCY_DECIMALS", "lots")]);
        let mut config = AppConfig::default();
        config.apply_overrides(|key| vars.get(key).cloned());
        assert_eq!(config.currency_decimals, 2);
    }

    #[test]
    fn test_validation() {
        let mut config = AppConfig::default();
        config.currency_decimals = 9;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        config.currency_decimals = 0;
        config.database_path = PathBuf::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_money_formatting() {
        let mut config = AppConfig::default();
        assert_eq!(config.money(Money::new(35.2625)), "$35.26");

        config.currency_symbol = "€".to_string();
        config.currency_decimals = 4;
        assert_eq!(config.money(Money::new(35.2625)), "€35.2625");
    }
}
