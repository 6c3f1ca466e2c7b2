//! Configuration System
//!
//! Loads FinSight settings from a TOML file with environment variable
//! overrides. Every section and field has a default, so an empty file (or no
//! file at all) is a valid configuration.

use crate::settings::{Currency, DateFormat, Preferences, Theme};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub export: ExportConfig,

    #[serde(default)]
    pub display: DisplayConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where transactions come from
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataConfig {
    /// CSV file replacing the built-in sample transactions
    pub transactions_csv: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportConfig {
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_output_dir() -> PathBuf {
    dirs::download_dir().unwrap_or_else(|| PathBuf::from("."))
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
        }
    }
}

/// Starting display preferences, as written in the file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_currency")]
    pub currency: String,

    #[serde(default = "default_date_format")]
    pub date_format: String,

    #[serde(default = "default_theme")]
    pub theme: String,
}

fn default_currency() -> String {
    "USD".to_string()
}

fn default_date_format() -> String {
    "MM/DD/YYYY".to_string()
}

fn default_theme() -> String {
    "dark".to_string()
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            currency: default_currency(),
            date_format: default_date_format(),
            theme: default_theme(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    /// `pretty` or `json`
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Log file for the terminal UI; headless commands log to stderr
    pub file: Option<PathBuf>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: None,
        }
    }
}

impl LoggingConfig {
    /// Configured file, or `finsight.log` in the local data directory
    pub fn file_path(&self) -> PathBuf {
        self.file.clone().unwrap_or_else(|| {
            dirs::data_local_dir()
                .map(|p| p.join("finsight").join("finsight.log"))
                .unwrap_or_else(|| PathBuf::from("finsight.log"))
        })
    }

    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
    }

    /// Defaults plus environment variable overrides
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment.
    ///
    /// A default file that exists but cannot be read or parsed is an error,
    /// the same as an explicit `--config` path.
    pub fn load_default() -> Result<Self, ConfigError> {
        let config_paths: Vec<PathBuf> = [
            dirs::config_dir().map(|p| p.join("finsight").join("config.toml")),
            Some(PathBuf::from("./finsight.toml")),
        ]
        .into_iter()
        .flatten()
        .collect();

        Self::load_first(&config_paths)
    }

    /// Load the first existing file in `paths`, or defaults plus environment when none exists
    pub fn load_first(paths: &[PathBuf]) -> Result<Self, ConfigError> {
        match paths.iter().find(|path| path.exists()) {
            Some(path) => Self::load_with_env(path),
            None => Ok(Self::from_env()),
        }
    }

    /// Apply environment variable overrides to an existing config
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from any key lookup
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup("FINSIGHT_TRANSACTIONS_CSV") {
            self.data.transactions_csv = Some(PathBuf::from(path));
        }
        if let Some(dir) = lookup("FINSIGHT_EXPORT_DIR") {
            self.export.output_dir = PathBuf::from(dir);
        }
        if let Some(currency) = lookup("FINSIGHT_CURRENCY") {
            self.display.currency = currency;
        }
        if let Some(level) = lookup("FINSIGHT_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("FINSIGHT_LOG_FORMAT") {
            self.logging.format = format;
        }
    }

    /// Typed preferences. Unknown values fall back to the default with a warning.
    pub fn preferences(&self) -> Preferences {
        let defaults = Preferences::default();
        let cfg = &self.display;

        let currency = Currency::from_code(&cfg.currency).unwrap_or_else(|| {
            tracing::warn!(value = %cfg.currency, "Unknown currency in config");
            defaults.currency
        });
        let date_format = DateFormat::from_label(&cfg.date_format).unwrap_or_else(|| {
            tracing::warn!(value = %cfg.date_format, "Unknown date format in config");
            defaults.date_format
        });
        let theme = Theme::parse(&cfg.theme).unwrap_or_else(|| {
            tracing::warn!(value = %cfg.theme, "Unknown theme in config");
            defaults.theme
        });

        Preferences {
            currency,
            date_format,
            theme,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# FinSight Configuration
#
# Environment variables override these settings:
# - FINSIGHT_TRANSACTIONS_CSV
# - FINSIGHT_EXPORT_DIR
# - FINSIGHT_CURRENCY
# - FINSIGHT_LOG_LEVEL
# - FINSIGHT_LOG_FORMAT

[data]
# CSV with columns id,description,amount,category,date,type
# Leave unset to use the built-in sample data
# transactions_csv = "~/finance/transactions.csv"

[export]
# Directory for CSV and PDF exports (defaults to the Downloads folder)
# output_dir = "~/Downloads"

[display]
# Currency: USD, EUR, GBP, JPY
currency = "USD"

# Date format: MM/DD/YYYY, DD/MM/YYYY, YYYY-MM-DD
date_format = "MM/DD/YYYY"

# Theme: dark or light
theme = "dark"

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty or json
format = "pretty"

# Log file used while the terminal UI is open
# file = "~/.local/share/finsight/finsight.log"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_empty_file_gives_defaults() {
        let config: Config = toml::from_str("").unwrap();

        assert_eq!(config, Config::default());
        assert_eq!(config.preferences(), Preferences::default());
    }

    #[test]
    fn test_default_template_parses() {
        let config: Config = toml::from_str(&generate_default_config()).unwrap();

        assert_eq!(config.display.currency, "USD");
        assert_eq!(config.logging.format, "pretty");
        assert!(config.data.transactions_csv.is_none());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("finsight.toml");
        std::fs::write(
            &path,
            "[display]\ncurrency = \"gbp\"\ndate_format = \"YYYY-MM-DD\"\ntheme = \"Light\"\n\
             [export]\noutput_dir = \"/tmp/out\"\n",
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        let prefs = config.preferences();

        assert_eq!(prefs.currency, Currency::Gbp);
        assert_eq!(prefs.date_format, DateFormat::Iso);
        assert_eq!(prefs.theme, Theme::Light);
        assert_eq!(config.export.output_dir, PathBuf::from("/tmp/out"));
    }

    #[test]
    fn test_load_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        assert!(matches!(Config::load(&missing), Err(ConfigError::Io { .. })));

        let broken = dir.path().join("broken.toml");
        std::fs::write(&broken, "[display\ncurrency = ").unwrap();
        assert!(matches!(Config::load(&broken), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_load_first_reports_broken_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        let broken = dir.path().join("finsight.toml");
        std::fs::write(&broken, "[display\ncurrency = ").unwrap();

        let result = Config::load_first(&[missing.clone(), broken]);
        assert!(matches!(result, Err(ConfigError::Parse { .. })));

        assert!(Config::load_first(&[missing]).is_ok());
    }

    #[test]
    fn test_load_first_takes_first_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("first.toml");
        let second = dir.path().join("second.toml");
        std::fs::write(&first, "[logging]\nlevel = \"debug\"\n").unwrap();
        std::fs::write(&second, "[display\n").unwrap();

        let config = Config::load_first(&[dir.path().join("none.toml"), first, second]).unwrap();

        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("FINSIGHT_TRANSACTIONS_CSV", "/data/tx.csv"),
            ("FINSIGHT_CURRENCY", "JPY"),
            ("FINSIGHT_LOG_FORMAT", "json"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.data.transactions_csv, Some(PathBuf::from("/data/tx.csv")));
        assert_eq!(config.preferences().currency, Currency::Jpy);
        assert!(config.logging.is_json());
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_unknown_display_values_fall_back() {
        let mut config = Config::default();
        config.display.currency = "BTC".to_string();
        config.display.theme = "solarized".to_string();

        assert_eq!(config.preferences(), Preferences::default());
    }
}
