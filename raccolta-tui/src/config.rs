//! Host configuration: TOML file with environment variable overrides.
//!
//! Looks for `raccolta.toml` (or the path in `RACCOLTA_CONFIG`). Every field has a
//! default so the file is optional.

use std::{env, fs, io, path::PathBuf};

use raccolta_core::ReminderSettings;
use serde::Deserialize;
use serde_json::Value;

const DEFAULT_PATH: &str = "raccolta.toml";

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct Config {
    /// Where the state snapshot comes from.
    pub source: SourceConfig,
    /// Card configuration, handed verbatim to the card.
    pub card: toml::Table,
    /// Reminder settings.
    pub reminders: ReminderSettings,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Terminal UI settings.
    pub ui: UiConfig,
}

/// Snapshot location and host language.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub(crate) struct SourceConfig {
    /// JSON file holding the entity states.
    pub snapshot: PathBuf,
    /// Host language code.
    pub language: Option<String>,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub(crate) struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
    /// Log file; the terminal itself belongs to the UI.
    pub file: PathBuf,
}

/// Terminal UI configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub(crate) struct UiConfig {
    /// Interval between snapshot reloads, in milliseconds.
    pub refresh_ms: u64,
}

impl Config {
    /// Load configuration from file (if present) then apply environment overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but is unreadable or malformed, or if the
    /// result fails validation.
    pub(crate) fn load() -> Result<Self, ConfigError> {
        let path = env::var("RACCOLTA_CONFIG").unwrap_or_else(|_| DEFAULT_PATH.to_owned());
        let mut config = Self::from_file(&path)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| env::var(key).ok());
    }

    /// Apply overrides from `lookup`. `RACCOLTA_LOG` wins over the generic `RUST_LOG`.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(val) = lookup("RACCOLTA_SNAPSHOT") {
            self.source.snapshot = PathBuf::from(val);
        }
        if let Some(val) = lookup("RACCOLTA_LANGUAGE") {
            self.source.language = Some(val);
        }
        if let Some(val) = lookup("RUST_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = lookup("RACCOLTA_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.ui.refresh_ms == 0 {
            return Err(ConfigError::Validation(
                "ui.refresh_ms must be non-zero".to_owned(),
            ));
        }
        if self.source.snapshot.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "source.snapshot must not be empty".to_owned(),
            ));
        }
        Ok(())
    }

    /// The `[card]` table as the loosely-typed value the card expects.
    ///
    /// # Errors
    ///
    /// Returns an error if the table holds values JSON cannot represent.
    pub(crate) fn card_value(&self) -> Result<Value, ConfigError> {
        serde_json::to_value(&self.card).map_err(ConfigError::Card)
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            snapshot: PathBuf::from("states.json"),
            language: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "raccolta_tui=info,raccolta_core=info".to_owned(),
            file: PathBuf::from("raccolta-tui.log"),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self { refresh_ms: 5000 }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub(crate) enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] io::Error),
    /// `[card]` could not be converted for the card.
    #[error("unsupported value in [card]")]
    Card(#[source] serde_json::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
