//! Startup connection to Postgres with bounded exponential backoff.

use crate::config::DatabaseConfig;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::time::Duration;
use tracing::{info, warn};

/// Postgres `cannot_connect_now`, returned while the server is starting up.
const CANNOT_CONNECT_NOW: &str = "57P03";

/// Calculate the delay before the next attempt.
///
/// Uses exponential backoff: `initial * 2^retry`, capped at `max`.
pub fn calculate_retry_delay(retry: u32, initial: Duration, max: Duration) -> Duration {
    let factor = 2u32.saturating_pow(retry);
    initial.saturating_mul(factor).min(max)
}

/// Whether a connection error is worth another attempt.
pub fn is_transient(error: &sqlx::Error) -> bool {
    match error {
        sqlx::Error::Io(_) | sqlx::Error::Tls(_) | sqlx::Error::PoolTimedOut => true,
        sqlx::Error::Database(db) => db.code().as_deref() == Some(CANNOT_CONNECT_NOW),
        _ => false,
    }
}

/// Connect to the database, retrying transient failures up to
/// `config.connect_attempts` times.
pub async fn connect_with_backoff(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    let mut attempt: u32 = 0;
    loop {
        attempt += 1;
        let result = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.url)
            .await;

        match result {
            Ok(pool) => {
                info!(attempt, "Database connection established");
                return Ok(pool);
            }
            Err(e) if attempt < config.connect_attempts && is_transient(&e) => {
                let delay =
                    calculate_retry_delay(attempt - 1, config.initial_backoff, config.max_backoff);
                warn!(
                    attempt,
                    max_attempts = config.connect_attempts,
                    delay_ms = delay.as_millis() as u64,
                    error = %e,
                    "Database not reachable yet, retrying"
                );
                tokio::time::sleep(delay).await;
            }
            Err(e) => return Err(e),
        }
    }
}
