//! TOML file configuration structures.
//!
//! These structs directly map to the `line-provider.toml` file format. Every
//! section is optional.

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use url::Url;

/// Root configuration structure as read from the TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub bet_maker: BetMakerConfig,
}

/// Server configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The address and port to listen on (e.g., "0.0.0.0:8002").
    #[serde(default = "default_listen_addr")]
    pub listen: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen_addr(),
        }
    }
}

fn default_listen_addr() -> SocketAddr {
    "0.0.0.0:8002".parse().expect("valid default address")
}

/// Where state change notifications are pushed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BetMakerConfig {
    /// Base URL of the bet-maker service.
    #[serde(default = "default_bet_maker_url")]
    pub url: Url,
    /// Request timeout for a notification, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for BetMakerConfig {
    fn default() -> Self {
        Self {
            url: default_bet_maker_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_bet_maker_url() -> Url {
    Url::parse("http://127.0.0.1:8001/").expect("valid default url")
}

fn default_timeout_secs() -> u64 {
    10
}
