//! Configuration handling for clear-todos
//!
//! Configuration is stored in `config.toml` inside the user config directory
//! (e.g. `~/.config/clear-todos/config.toml`), or at an explicit path given
//! with `--config` / `CLEAR_TODOS_CONFIG`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// Output format for commands
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DefaultFormat {
    #[default]
    Text,
    Json,
}

/// User configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Output format when `--format` is not given
    pub default_format: DefaultFormat,

    /// Leave files with nothing to remove untouched
    pub skip_unchanged: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_format: DefaultFormat::Text,
            skip_unchanged: true,
        }
    }
}

impl Config {
    /// Returns the default config file location
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("dev", "clear-todos", "clear-todos")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Loads configuration from an explicit path or the default location
    ///
    /// A missing default file yields the defaults; a missing explicit file
    /// is an error.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::NotFound(path.to_path_buf()).into());
                }
                Self::load_from(path)
            }
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::load_from(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    /// Loads configuration from a file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;

        Self::parse(&content).with_context(|| format!("Failed to parse config: {}", path.display()))
    }

    /// Parses configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Serializes the configuration as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config() {
        let config = Config::default();

        assert_eq!(config.default_format, DefaultFormat::Text);
        assert!(config.skip_unchanged);
    }

    #[test]
    fn parse_config() {
        let toml = r#"
default_format = "json"
skip_unchanged = false
"#;

        let config = Config::parse(toml).unwrap();
        assert_eq!(config.default_format, DefaultFormat::Json);
        assert!(!config.skip_unchanged);
    }

    #[test]
    fn partial_config_uses_defaults() {
        let config = Config::parse("default_format = \"json\"\n").unwrap();
        assert!(config.skip_unchanged);
    }

    #[test]
    fn invalid_config_is_a_parse_error() {
        let result = Config::parse("default_format = \"yaml\"\n");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn load_explicit_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "default_format = \"json\"\n").unwrap();

        let config = Config::load(Some(path.as_path())).unwrap();
        assert_eq!(config.default_format, DefaultFormat::Json);
    }

    #[test]
    fn load_missing_explicit_path_fails() {
        let dir = TempDir::new().unwrap();
        let result = Config::load(Some(dir.path().join("nope.toml").as_path()));

        assert!(result.is_err());
    }

    #[test]
    fn round_trips_through_toml() {
        let config = Config {
            default_format: DefaultFormat::Json,
            skip_unchanged: false,
        };

        let parsed = Config::parse(&config.to_toml().unwrap()).unwrap();
        assert_eq!(parsed.default_format, DefaultFormat::Json);
        assert!(!parsed.skip_unchanged);
    }
}
