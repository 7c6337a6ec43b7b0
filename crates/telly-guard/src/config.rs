//! Guard configuration
//!
//! Loaded from a JSON file; every field has a default so a partial file is
//! valid. The file location can be overridden with `TELLY_CONFIG`.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use telly_core::{is_valid_pin, PIN_LENGTH};

/// Environment variable naming the config file
pub const CONFIG_ENV_VAR: &str = "TELLY_CONFIG";

/// Application directory under the platform config/data dirs
const APP_DIR_NAME: &str = "telly";

/// PIN shipped with the app
pub const DEFAULT_PIN: &str = "6669";

/// Delay before a rejected entry is cleared (milliseconds)
pub const DEFAULT_PIN_CLEAR_DELAY_MS: u64 = 1000;

/// Session guard configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GuardConfig {
    /// PIN compared against complete entries
    #[serde(default = "default_pin")]
    pub expected_pin: String,

    /// Delay before a rejected entry is cleared (milliseconds)
    #[serde(default = "default_clear_delay_ms")]
    pub pin_clear_delay_ms: u64,

    /// Location of the on-device key-value store
    #[serde(default = "default_store_path")]
    pub store_path: PathBuf,
}

fn default_pin() -> String {
    DEFAULT_PIN.to_string()
}

fn default_clear_delay_ms() -> u64 {
    DEFAULT_PIN_CLEAR_DELAY_MS
}

fn default_store_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
        .join("store.json")
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            expected_pin: default_pin(),
            pin_clear_delay_ms: default_clear_delay_ms(),
            store_path: default_store_path(),
        }
    }
}

impl GuardConfig {
    /// Delay before a rejected entry is cleared
    pub fn pin_clear_delay(&self) -> Duration {
        Duration::from_millis(self.pin_clear_delay_ms)
    }

    /// Default config file path (`TELLY_CONFIG`, else `<config dir>/telly/config.json`)
    pub fn default_path() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV_VAR) {
            return Some(PathBuf::from(path));
        }
        dirs::config_dir().map(|d| d.join(APP_DIR_NAME).join("config.json"))
    }

    /// Load configuration from file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        let config: Self =
            serde_json::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from the default path
    ///
    /// Returns the default configuration if the file doesn't exist or can't
    /// be used.
    pub fn load_or_default() -> Self {
        let path = match Self::default_path() {
            Some(p) => p,
            None => return Self::default(),
        };

        if !path.exists() {
            return Self::default();
        }

        Self::load(&path).unwrap_or_else(|e| {
            tracing::warn!("Ignoring config file {:?}: {}", path, e);
            Self::default()
        })
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| ConfigError::Io(e.to_string()))?;
            }
        }

        let content =
            serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))?;
        fs::write(path, content).map_err(|e| ConfigError::Io(e.to_string()))?;

        tracing::debug!("Saved config to {:?}", path);
        Ok(())
    }

    /// Check field constraints
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_valid_pin(&self.expected_pin) {
            return Err(ConfigError::InvalidPin(PIN_LENGTH));
        }
        Ok(())
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("PIN must be exactly {0} digits")]
    InvalidPin(usize),
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = GuardConfig::default();
        assert_eq!(config.expected_pin, "6669");
        assert_eq!(config.pin_clear_delay(), Duration::from_millis(1000));
        assert!(config.store_path.ends_with("telly/store.json"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"pin_clear_delay_ms": 250}"#).unwrap();

        let config = GuardConfig::load(&path).unwrap();
        assert_eq!(config.pin_clear_delay_ms, 250);
        assert_eq!(config.expected_pin, DEFAULT_PIN);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("telly").join("config.json");
        let config = GuardConfig {
            expected_pin: "1357".to_string(),
            pin_clear_delay_ms: 500,
            store_path: dir.path().join("store.json"),
        };

        config.save(&path).unwrap();
        assert_eq!(GuardConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_invalid_pin_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"expected_pin": "12345"}"#).unwrap();

        assert!(matches!(
            GuardConfig::load(&path),
            Err(ConfigError::InvalidPin(4))
        ));
    }

    #[test]
    fn test_malformed_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "pin = 6669").unwrap();

        assert!(matches!(GuardConfig::load(&path), Err(ConfigError::Parse(_))));
    }
}
