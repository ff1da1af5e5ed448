//! Configuration management for contactbook
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files, environment variables, and CLI overrides.

use crate::error::{ContactbookError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure for contactbook
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Remote API settings
    #[serde(default)]
    pub api: ApiConfig,
    /// Where the session token and language preference are persisted
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Remote API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL the fixed endpoint paths are appended to
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout (seconds)
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

fn default_base_url() -> String {
    "http://localhost:4000".to_string()
}

fn default_timeout() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout(),
        }
    }
}

/// Session persistence configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Persistence backend
    #[serde(default)]
    pub backend: StorageBackend,

    /// Override for the file backend's location.
    ///
    /// Defaults to `session.json` in the platform data directory.
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// Service name used for keyring entries
    #[serde(default = "default_keyring_service")]
    pub keyring_service: String,
}

fn default_keyring_service() -> String {
    "contactbook".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            path: None,
            keyring_service: default_keyring_service(),
        }
    }
}

/// Session persistence backend
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    /// JSON file on disk
    #[default]
    File,
    /// OS credential store
    Keyring,
    /// Process memory; nothing survives exit
    Memory,
}

impl StorageBackend {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "file" => Some(Self::File),
            "keyring" => Some(Self::Keyring),
            "memory" => Some(Self::Memory),
            _ => None,
        }
    }
}

impl Config {
    /// Load configuration from file with environment and CLI overrides
    ///
    /// A missing file is not an error; defaults are used instead.
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be read or parsed
    pub fn load(path: &str, cli: &crate::cli::Cli) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::warn!("Config file not found at {}, using defaults", path);
            Self::default()
        };

        config.apply_env_vars();
        config.apply_cli_overrides(cli);

        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ContactbookError::Config(format!("Failed to read config file: {}", e)))?;
        serde_yaml::from_str(&contents)
            .map_err(|e| ContactbookError::Config(format!("Failed to parse config: {}", e)).into())
    }

    fn apply_env_vars(&mut self) {
        if let Ok(base_url) = std::env::var("CONTACTBOOK_API_URL") {
            tracing::debug!(base_url = %base_url, "Env override: CONTACTBOOK_API_URL");
            self.api.base_url = base_url;
        }

        if let Ok(timeout) = std::env::var("CONTACTBOOK_API_TIMEOUT") {
            if let Ok(value) = timeout.parse() {
                self.api.timeout_seconds = value;
            } else {
                tracing::warn!("Invalid CONTACTBOOK_API_TIMEOUT: {}", timeout);
            }
        }

        if let Ok(backend) = std::env::var("CONTACTBOOK_STORAGE_BACKEND") {
            match StorageBackend::parse(&backend) {
                Some(value) => self.storage.backend = value,
                None => tracing::warn!("Invalid storage backend: {}, keeping configured", backend),
            }
        }

        if let Ok(path) = std::env::var("CONTACTBOOK_STORAGE_PATH") {
            self.storage.path = Some(PathBuf::from(path));
        }
    }

    fn apply_cli_overrides(&mut self, cli: &crate::cli::Cli) {
        if let Some(api_url) = &cli.api_url {
            self.api.base_url = api_url.clone();
        }
        if cli.verbose {
            tracing::debug!("Verbose mode enabled");
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns error if the base URL is not an absolute http(s) URL or the
    /// timeout is zero
    pub fn validate(&self) -> Result<()> {
        if self.api.base_url.trim().is_empty() {
            return Err(ContactbookError::Config("api.base_url cannot be empty".to_string()).into());
        }

        let parsed = url::Url::parse(&self.api.base_url).map_err(|e| {
            ContactbookError::Config(format!(
                "Invalid api.base_url {}: {}",
                self.api.base_url, e
            ))
        })?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ContactbookError::Config(format!(
                "api.base_url must use http or https, got: {}",
                parsed.scheme()
            ))
            .into());
        }

        if self.api.timeout_seconds == 0 {
            return Err(ContactbookError::Config(
                "api.timeout_seconds must be greater than 0".to_string(),
            )
            .into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use serial_test::serial;
    use tempfile::TempDir;

    fn clear_env() {
        for key in [
            "CONTACTBOOK_API_URL",
            "CONTACTBOOK_API_TIMEOUT",
            "CONTACTBOOK_STORAGE_BACKEND",
            "CONTACTBOOK_STORAGE_PATH",
        ] {
            std::env::remove_var(key);
        }
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.api.base_url, "http://localhost:4000");
        assert_eq!(config.api.timeout_seconds, 30);
        assert_eq!(config.storage.backend, StorageBackend::File);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_empty_url() {
        let mut config = Config::default();
        config.api.base_url = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_non_http_scheme() {
        let mut config = Config::default();
        config.api.base_url = "ftp://example.com".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_zero_timeout() {
        let mut config = Config::default();
        config.api.timeout_seconds = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    #[serial]
    fn test_load_from_yaml_with_partial_fields() {
        clear_env();
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(
            &path,
            "api:\n  base_url: https://contacts.example.com\nstorage:\n  backend: memory\n",
        )
        .unwrap();

        let config = Config::load(path.to_str().unwrap(), &Cli::default()).unwrap();
        assert_eq!(config.api.base_url, "https://contacts.example.com");
        assert_eq!(config.api.timeout_seconds, 30);
        assert_eq!(config.storage.backend, StorageBackend::Memory);
    }

    #[test]
    #[serial]
    fn test_missing_file_uses_defaults() {
        clear_env();
        let config = Config::load("/nonexistent/contactbook.yaml", &Cli::default()).unwrap();
        assert_eq!(config.api.base_url, "http://localhost:4000");
    }

    #[test]
    #[serial]
    fn test_env_overrides() {
        clear_env();
        std::env::set_var("CONTACTBOOK_API_URL", "http://10.0.0.5:4000");
        std::env::set_var("CONTACTBOOK_STORAGE_BACKEND", "keyring");
        std::env::set_var("CONTACTBOOK_API_TIMEOUT", "not-a-number");

        let config = Config::load("/nonexistent/contactbook.yaml", &Cli::default()).unwrap();
        clear_env();

        assert_eq!(config.api.base_url, "http://10.0.0.5:4000");
        assert_eq!(config.storage.backend, StorageBackend::Keyring);
        assert_eq!(config.api.timeout_seconds, 30);
    }

    #[test]
    #[serial]
    fn test_cli_url_beats_env() {
        clear_env();
        std::env::set_var("CONTACTBOOK_API_URL", "http://from-env:4000");
        let mut cli = Cli::default();
        cli.api_url = Some("http://from-cli:4000".to_string());

        let config = Config::load("/nonexistent/contactbook.yaml", &cli).unwrap();
        clear_env();

        assert_eq!(config.api.base_url, "http://from-cli:4000");
    }

    #[test]
    fn test_invalid_yaml_is_config_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "api: [unclosed").unwrap();
        let err = Config::load(path.to_str().unwrap(), &Cli::default()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config"));
    }
}
