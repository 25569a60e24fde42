//! # Configuration Management Module
//!
//! ## Purpose
//! Centralized configuration for the corpus browser: which corpus files to
//! load, presentation settings, and logging, with validation and type-safe
//! access to every setting.
//!
//! ## Input/Output Specification
//! - **Input**: Configuration file (TOML), environment variables, CLI arguments
//! - **Output**: Validated configuration structs with defaults and overrides
//! - **Validation**: Non-empty corpus list, known log level, sane durations
//!
//! ## Configuration Sources (in order of precedence)
//! 1. Command line arguments (highest priority)
//! 2. Environment variables
//! 3. Configuration file
//! 4. Default values (lowest priority)
//!
//! ## Usage
//! ```rust,no_run
//! use norma_search::config::Config;
//!
//! # fn main() -> norma_search::Result<()> {
//! let config = Config::from_file("norma-search.toml")?;
//! println!("Corpus files: {}", config.corpus.paths.len());
//! # Ok(())
//! # }
//! ```

use crate::errors::{NormaError, Result};
use crate::validation_error;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure containing all settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Corpus files and startup selection
    pub corpus: CorpusConfig,
    /// Presentation behavior
    pub ui: UiConfig,
    /// Logging settings
    pub logging: LoggingConfig,
}

/// Corpus loading configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusConfig {
    /// Corpus files to load, in display order
    pub paths: Vec<PathBuf>,
    /// Source acronyms selected at startup
    pub preselect: Vec<String>,
}

/// Presentation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// How long the copy confirmation stays visible, in milliseconds
    pub copy_feedback_ms: u64,
    /// Style match segments with ANSI colors
    pub color: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Enable structured JSON logging
    pub json_format: bool,
}

impl Config {
    /// Load configuration from a specific file. A missing file is not an
    /// error; defaults apply.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            tracing::warn!("Configuration file not found: {:?}, using defaults", path);
            let mut config = Self::default();
            config.apply_env_overrides()?;
            config.validate()?;
            return Ok(config);
        }

        let content = std::fs::read_to_string(path).map_err(|e| NormaError::Config {
            message: format!("Failed to read config file {:?}: {}", path, e),
        })?;

        let mut config: Config = toml::from_str(&content).map_err(|e| NormaError::Config {
            message: format!("Failed to parse config file {:?}: {}", path, e),
        })?;

        // Apply environment variable overrides
        config.apply_env_overrides()?;

        // Validate configuration
        config.validate()?;

        Ok(config)
    }

    /// The copy confirmation window as a `Duration`.
    pub fn copy_feedback_window(&self) -> Duration {
        Duration::from_millis(self.ui.copy_feedback_ms)
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(level) = std::env::var("NORMA_SEARCH_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(window) = std::env::var("NORMA_SEARCH_COPY_FEEDBACK_MS") {
            self.ui.copy_feedback_ms = window.parse().map_err(|_| NormaError::Config {
                message: "Invalid duration in NORMA_SEARCH_COPY_FEEDBACK_MS".to_string(),
            })?;
        }
        if std::env::var("NORMA_SEARCH_NO_COLOR").is_ok() {
            self.ui.color = false;
        }
        Ok(())
    }

    /// Validate configuration values
    fn validate(&self) -> Result<()> {
        if self.corpus.paths.is_empty() {
            return Err(validation_error!(
                "corpus.paths",
                "at least one corpus file must be configured"
            ));
        }

        if self.ui.copy_feedback_ms == 0 {
            return Err(validation_error!(
                "ui.copy_feedback_ms",
                "must be greater than zero"
            ));
        }

        if self.logging.level.parse::<tracing::Level>().is_err() {
            return Err(validation_error!(
                "logging.level",
                format!("unknown log level '{}'", self.logging.level)
            ));
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            corpus: CorpusConfig {
                paths: vec![
                    PathBuf::from("data/lead.json"),
                    PathBuf::from("data/rpsad.json"),
                    PathBuf::from("data/rreepp.json"),
                ],
                preselect: Vec::new(),
            },
            ui: UiConfig {
                copy_feedback_ms: 2000,
                color: true,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                json_format: false,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_validates() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_from_file_parses_full_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            br#"
[corpus]
paths = ["corpora/uno.json", "corpora/dos.json"]
preselect = ["UNO"]

[ui]
copy_feedback_ms = 1500
color = false

[logging]
level = "debug"
json_format = false
"#,
        )
        .unwrap();
        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.corpus.paths.len(), 2);
        assert_eq!(config.corpus.preselect, vec!["UNO"]);
        assert_eq!(config.ui.copy_feedback_ms, 1500);
        assert_eq!(config.copy_feedback_window(), Duration::from_millis(1500));
        assert!(!config.ui.color);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = Config::from_file("definitely/not/here.toml").unwrap();
        assert_eq!(config.corpus.paths.len(), 3);
        assert_eq!(config.ui.copy_feedback_ms, 2000);
    }

    #[test]
    fn test_malformed_toml_is_a_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"[corpus\npaths = oops").unwrap();
        let err = Config::from_file(file.path()).unwrap_err();
        assert_eq!(err.category(), "configuration");
    }

    #[test]
    fn test_empty_corpus_list_is_rejected() {
        let mut config = Config::default();
        config.corpus.paths.clear();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("corpus.paths"));
    }

    #[test]
    fn test_zero_feedback_window_is_rejected() {
        let mut config = Config::default();
        config.ui.copy_feedback_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unknown_log_level_is_rejected() {
        let mut config = Config::default();
        config.logging.level = "chatty".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("logging.level"));
    }
}
