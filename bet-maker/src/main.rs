//! bet-maker
//!
//! Accepts bets on open line-provider events, stores them in Postgres and
//! applies the event state notifications pushed by the line-provider.

mod api;
mod config;
mod server;
mod state;

use betline_core::framework::DatabaseProcessor;
use betline_core::utils::backoff::connect_with_backoff;
use betline_sdk::client::LineProviderClient;
use clap::Parser;
use config::{ConfigLoader, Overrides};
use server::{build_router, run_server};
use state::AppState;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use url::Url;

/// bet-maker - bet placement and settlement
#[derive(Parser, Debug)]
#[command(name = "bet-maker")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the configuration file
    #[arg(short, long, default_value = "./bet-maker.toml")]
    config: PathBuf,

    /// Override the listen address (e.g., 0.0.0.0:8001)
    #[arg(short, long)]
    listen: Option<SocketAddr>,

    /// Base URL of the line-provider service
    #[arg(long, env = "LINE_PROVIDER_URL")]
    line_provider_url: Option<Url>,

    /// Postgres connection URL
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let args = Args::parse();

    tracing::info!("Starting bet-maker v{}", env!("CARGO_PKG_VERSION"));

    let overrides = Overrides {
        listen: args.listen,
        line_provider_url: args.line_provider_url,
        database_url: args.database_url,
    };
    let loaded_config = ConfigLoader::new(&args.config, overrides)
        .load()
        .map_err(|e| {
            tracing::error!("Failed to load configuration: {}", e);
            e
        })?;

    let listen_addr = loaded_config.server.listen;
    tracing::info!(
        line_provider = %loaded_config.line_provider.base_url,
        "Configuration loaded"
    );

    tracing::info!("Connecting to database...");
    let db_pool = connect_with_backoff(&loaded_config.database)
        .await
        .map_err(|e| {
            tracing::error!("Failed to connect to database: {}", e);
            e
        })?;
    tracing::info!("Database connection established");

    tracing::info!("Running database migrations...");
    sqlx::migrate!("../migrations")
        .run(&db_pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to run migrations: {}", e);
            e
        })?;
    tracing::info!("Migrations completed successfully");

    let http_client = loaded_config.line_provider.http_client()?;
    let line_provider = LineProviderClient::new(loaded_config.line_provider.base_url.clone())
        .with_http_client(http_client);

    let state = AppState::new(
        Arc::new(DatabaseProcessor {
            pool: db_pool.clone(),
        }),
        Arc::new(line_provider),
    );
    let router = build_router(state);

    tracing::info!("Starting HTTP server on {}", listen_addr);
    let result = run_server(router, listen_addr).await;

    tracing::info!("Closing database connections...");
    db_pool.close().await;
    tracing::info!("Server shutdown complete");

    result.map_err(Into::into)
}

/// Initialize the tracing subscriber with environment-based filtering.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,sqlx=warn,tower_http=debug"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
