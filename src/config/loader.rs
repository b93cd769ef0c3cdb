use std::fs;
use std::path::PathBuf;
use thiserror::Error;

use crate::config::types::ApiConfig;

/// Environment variable overriding the configured base URL.
pub const BASE_URL_ENV_VAR: &str = "PRODUCT_API_BASE_URL";

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

impl ApiConfig {
    /// Returns the path to the configuration file.
    ///
    /// Uses `~/.config/product-console/config.toml` on Unix/macOS, or
    /// equivalent on other platforms via `dirs::config_dir()`. Falls back
    /// to the current directory if config_dir is unavailable.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("product-console").join("config.toml")
    }

    /// Loads configuration from the default config file.
    ///
    /// - If the file doesn't exist, returns `ApiConfig::default()`.
    /// - If the file exists, parses it as TOML and validates.
    /// - In either case, `PRODUCT_API_BASE_URL` overrides the base URL
    ///   when set and non-empty.
    pub fn load() -> Result<Self, ConfigError> {
        let config = Self::load_from(Self::config_path())?;
        Ok(config.with_env_override())
    }

    /// Loads configuration from a specific path, without the env override.
    pub fn load_from(path: PathBuf) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
            path: path.clone(),
            source: e,
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.clone(),
            source: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Applies the `PRODUCT_API_BASE_URL` override when present.
    pub fn with_env_override(mut self) -> Self {
        if let Ok(url) = std::env::var(BASE_URL_ENV_VAR) {
            if !url.trim().is_empty() {
                tracing::info!(base_url = %url, "Base URL overridden from environment");
                self.base_url = url;
            }
        }
        self
    }

    /// Validates the configuration.
    ///
    /// Checks:
    /// - Base URL is non-empty and uses an http(s) scheme
    /// - Timeout is nonzero
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                message: "Base URL must not be empty".to_string(),
            });
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ConfigError::ValidationError {
                message: format!("Base URL '{}' must use http or https", self.base_url),
            });
        }

        if self.timeout_seconds == 0 {
            return Err(ConfigError::ValidationError {
                message: "Timeout must be nonzero".to_string(),
            });
        }

        Ok(())
    }
}
