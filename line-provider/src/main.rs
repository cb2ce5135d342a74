//! line-provider
//!
//! Keeps the catalogue of sporting events in memory and pushes state changes
//! to the bet-maker.

mod api;
mod config;
mod server;
mod state;

use betline_core::events::EventRegistry;
use betline_sdk::client::BetMakerClient;
use clap::Parser;
use config::{ConfigLoader, Overrides};
use server::{build_router, run_server};
use state::AppState;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use url::Url;

/// line-provider - in-memory event catalogue
#[derive(Parser, Debug)]
#[command(name = "line-provider")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the configuration file
    #[arg(short, long, default_value = "./line-provider.toml")]
    config: PathBuf,

    /// Override the listen address (e.g., 0.0.0.0:8002)
    #[arg(short, long)]
    listen: Option<SocketAddr>,

    /// Base URL of the bet-maker service
    #[arg(long, env = "BET_MAKER_URL")]
    bet_maker_url: Option<Url>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let args = Args::parse();

    tracing::info!("Starting line-provider v{}", env!("CARGO_PKG_VERSION"));

    let overrides = Overrides {
        listen: args.listen,
        bet_maker_url: args.bet_maker_url,
    };
    let loaded_config = ConfigLoader::new(&args.config, overrides)
        .load()
        .map_err(|e| {
            tracing::error!("Failed to load configuration: {}", e);
            e
        })?;

    let listen_addr = loaded_config.server.listen;
    tracing::info!(
        bet_maker = %loaded_config.bet_maker.base_url,
        "Configuration loaded"
    );

    let http_client = loaded_config.bet_maker.http_client()?;
    let notifier =
        BetMakerClient::new(loaded_config.bet_maker.base_url.clone()).with_http_client(http_client);
    let registry = Arc::new(EventRegistry::new(Arc::new(notifier)));

    let router = build_router(AppState::new(registry));

    tracing::info!("Starting HTTP server on {}", listen_addr);
    run_server(router, listen_addr).await?;
    tracing::info!("Server shutdown complete");

    Ok(())
}

/// Initialize the tracing subscriber with environment-based filtering.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
