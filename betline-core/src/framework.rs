use sqlx::PgPool;

/// Runs SQL processors against the shared connection pool.
#[derive(Debug, Clone)]
pub struct DatabaseProcessor {
    pub pool: PgPool,
}
