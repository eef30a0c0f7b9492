//! Application configuration (todolist.toml)

use std::path::{Path, PathBuf};
use std::str::FromStr;

use log::LevelFilter;
use serde::{Deserialize, Serialize};

use crate::{APP_NAME, DEFAULT_STORAGE_KEY};

const CONFIG_FILE_NAME: &str = "config.toml";
const LOCAL_CONFIG_FILE_NAME: &str = "todolist.toml";

/// Settings for where tasks are kept and how the app logs
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory holding the storage slots
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Storage slot the task collection is written under
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Log file; relative paths are resolved against `data_dir`
    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            storage_key: default_storage_key(),
            log_level: default_log_level(),
            log_file: default_log_file(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|p| p.join(APP_NAME))
        .unwrap_or_else(|| PathBuf::from("."))
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> PathBuf {
    PathBuf::from("application.log")
}

impl AppConfig {
    /// Find the config file in standard locations
    pub fn find_config_path() -> Option<PathBuf> {
        // Check in order: user config dir, cwd
        let candidates = [
            dirs::config_dir().map(|p| p.join(APP_NAME).join(CONFIG_FILE_NAME)),
            Some(PathBuf::from(LOCAL_CONFIG_FILE_NAME)),
        ];

        candidates.into_iter().flatten().find(|candidate| candidate.exists())
    }

    /// Load configuration from the first file found, or defaults if there is none
    pub fn load() -> Result<Self, ConfigError> {
        match Self::find_config_path() {
            Some(path) => Self::load_from_path(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn level_filter(&self) -> Result<LevelFilter, ConfigError> {
        LevelFilter::from_str(&self.log_level)
            .map_err(|_| ConfigError::InvalidLogLevel(self.log_level.clone()))
    }

    pub fn log_path(&self) -> PathBuf {
        if self.log_file.is_absolute() {
            self.log_file.clone()
        } else {
            self.data_dir.join(&self.log_file)
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub enum ConfigError {
    IoError(std::io::Error),
    ParseError(toml::de::Error),
    InvalidLogLevel(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {}", e),
            ConfigError::ParseError(e) => write!(f, "Parse error: {}", e),
            ConfigError::InvalidLogLevel(level) => write!(f, "Invalid log level: {}", level),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::IoError(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::ParseError(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.storage_key, "@toDos");
        assert_eq!(config.level_filter().unwrap(), LevelFilter::Info);
        assert!(config.log_path().ends_with("application.log"));
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("todolist.toml");
        std::fs::write(&path, "data_dir = \"/tmp/todo-data\"\nlog_level = \"debug\"\n").unwrap();

        let config = AppConfig::load_from_path(&path).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/tmp/todo-data"));
        assert_eq!(config.storage_key, "@toDos");
        assert_eq!(config.level_filter().unwrap(), LevelFilter::Debug);
        assert_eq!(
            config.log_path(),
            PathBuf::from("/tmp/todo-data/application.log")
        );
    }

    #[test]
    fn test_absolute_log_file_is_kept() {
        let config = AppConfig {
            log_file: PathBuf::from("/var/log/todolist.log"),
            ..AppConfig::default()
        };
        assert_eq!(config.log_path(), PathBuf::from("/var/log/todolist.log"));
    }

    #[test]
    fn test_errors() {
        let dir = TempDir::new().unwrap();

        let missing = AppConfig::load_from_path(&dir.path().join("missing.toml"));
        assert!(matches!(missing, Err(ConfigError::IoError(_))));

        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "data_dir = [").unwrap();
        assert!(matches!(
            AppConfig::load_from_path(&path),
            Err(ConfigError::ParseError(_))
        ));

        let config = AppConfig {
            log_level: "loud".to_string(),
            ..AppConfig::default()
        };
        assert!(matches!(
            config.level_filter(),
            Err(ConfigError::InvalidLogLevel(_))
        ));
    }
}
