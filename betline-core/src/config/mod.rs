//! Runtime configuration types for both services.
//!
//! These are the validated values the servers run with. Loading and parsing
//! (TOML file, CLI flags, environment) is handled by each server crate.

use std::net::SocketAddr;
use std::time::Duration;
use url::Url;

/// HTTP listener configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// The address and port to listen on.
    pub listen: SocketAddr,
}

/// Where the peer service lives and how long to wait for it.
#[derive(Debug, Clone)]
pub struct PeerConfig {
    pub base_url: Url,
    /// Upper bound for a single request; expiry counts as upstream unavailable.
    pub timeout: Duration,
}

impl PeerConfig {
    /// Build a `reqwest::Client` honoring the configured timeout.
    pub fn http_client(&self) -> Result<reqwest::Client, reqwest::Error> {
        reqwest::Client::builder().timeout(self.timeout).build()
    }
}

/// Postgres connection settings for the bet store.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    /// Total connection attempts at startup, including the first.
    pub connect_attempts: u32,
    pub initial_backoff: Duration,
    pub max_backoff: Duration,
}
