//! Configuration module for line-provider.
//!
//! Handles loading configuration from an optional TOML file, CLI arguments,
//! and environment variables.

pub mod file;

use crate::config::file::FileConfig;
use betline_core::config::{PeerConfig, ServerConfig};
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
    pub bet_maker: PeerConfig,
}

/// Values given on the command line or through the environment.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub listen: Option<SocketAddr>,
    pub bet_maker_url: Option<Url>,
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
        if let Some(url) = &self.overrides.bet_maker_url {
            file_config.bet_maker.url = url.clone();
        }

        self.validate(&file_config)?;

        Ok(LoadedConfig {
            server: ServerConfig {
                listen: file_config.server.listen,
            },
            bet_maker: PeerConfig {
                base_url: file_config.bet_maker.url,
                timeout: Duration::from_secs(file_config.bet_maker.timeout_secs),
            },
        })
    }

    fn validate(&self, config: &FileConfig) -> Result<(), ConfigError> {
        if config.bet_maker.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "bet_maker.timeout_secs must be positive".to_string(),
            ));
        }
        if !matches!(config.bet_maker.url.scheme(), "http" | "https") {
            return Err(ConfigError::ValidationError(format!(
                "bet_maker.url must be http(s), got {}",
                config.bet_maker.url
            )));
        }
        Ok(())
    }
}
