//! Configuration module for bet-maker.
//!
//! Handles loading configuration from an optional TOML file, CLI arguments,
//! and environment variables.

pub mod file;

use crate::config::file::FileConfig;
use betline_core::config::{DatabaseConfig, PeerConfig, ServerConfig};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("validation error: {0}")]
    ValidationError(String),
}

/// Loaded configuration result containing all parts.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub server: ServerConfig,
    pub line_provider: PeerConfig,
    pub database: DatabaseConfig,
}

/// Values given on the command line or through the environment.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub listen: Option<SocketAddr>,
    pub line_provider_url: Option<Url>,
    pub database_url: Option<String>,
}

/// Configuration loader that handles the complete loading process.
pub struct ConfigLoader {
    config_path: PathBuf,
    overrides: Overrides,
}

impl ConfigLoader {
    /// Create a new config loader.
    pub fn new(config_path: impl AsRef<Path>, overrides: Overrides) -> Self {
        Self {
            config_path: config_path.as_ref().to_path_buf(),
            overrides,
        }
    }

    /// Load and process the configuration.
    ///
    /// This will:
    /// 1. Read the TOML file, or fall back to defaults if it does not exist
    /// 2. Apply CLI / environment overrides
    /// 3. Validate the configuration
    pub fn load(&self) -> Result<LoadedConfig, ConfigError> {
        let mut file_config = if self.config_path.exists() {
            let config_content = std::fs::read_to_string(&self.config_path)?;
            toml::from_str(&config_content)?
        } else {
            tracing::info!(
                "Config file {:?} not found, using defaults",
                self.config_path
            );
            FileConfig::default()
        };

        if let Some(listen) = self.overrides.listen {
            file_config.server.listen = listen;
        }
        if let Some(url) = &self.overrides.line_provider_url {
            file_config.line_provider.url = url.clone();
        }
        if let Some(url) = &self.overrides.database_url {
            file_config.database.url = url.clone();
        }

        self.validate(&file_config)?;

        let database = file_config.database;
        Ok(LoadedConfig {
            server: ServerConfig {
                listen: file_config.server.listen,
            },
            line_provider: PeerConfig {
                base_url: file_config.line_provider.url,
                timeout: Duration::from_secs(file_config.line_provider.timeout_secs),
            },
            database: DatabaseConfig {
                url: database.url,
                max_connections: database.max_connections,
                connect_attempts: database.connect_attempts,
                initial_backoff: Duration::from_millis(database.initial_backoff_ms),
                max_backoff: Duration::from_millis(database.max_backoff_ms),
            },
        })
    }

    fn validate(&self, config: &FileConfig) -> Result<(), ConfigError> {
        if config.line_provider.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "line_provider.timeout_secs must be positive".to_string(),
            ));
        }
        if !matches!(config.line_provider.url.scheme(), "http" | "https") {
            return Err(ConfigError::ValidationError(format!(
                "line_provider.url must be http(s), got {}",
                config.line_provider.url
            )));
        }
        if config.database.max_connections == 0 {
            return Err(ConfigError::ValidationError(
                "database.max_connections must be positive".to_string(),
            ));
        }
        if config.database.connect_attempts == 0 {
            return Err(ConfigError::ValidationError(
                "database.connect_attempts must be at least 1".to_string(),
            ));
        }
        if config.database.initial_backoff_ms > config.database.max_backoff_ms {
            return Err(ConfigError::ValidationError(
                "database.initial_backoff_ms must not exceed database.max_backoff_ms".to_string(),
            ));
        }
        Ok(())
    }
}
