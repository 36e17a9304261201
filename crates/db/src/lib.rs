//! PostgreSQL access for the Ontdek Polen backend.
//!
//! Pool construction, migrations and the repository layer. Every repository
//! is a zero-sized struct whose methods take `&PgPool` first.

use std::time::Duration;

use ontdek_core::platform::Platform;
use sqlx::postgres::PgPoolOptions;

pub mod models;
pub mod repositories;

pub type DbPool = sqlx::PgPool;

/// Default connection-establishment timeout.
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Pool settings derived from the deployment platform.
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub connect_timeout: Duration,
}

impl DbConfig {
    /// Build pool settings for `platform`.
    ///
    /// | Env var                   | Default |
    /// |---------------------------|---------|
    /// | `DATABASE_URL`            | required |
    /// | `DB_CONNECT_TIMEOUT_SECS` | `10`    |
    ///
    /// Serverless platforms get a small pool, long-lived processes a larger one.
    pub fn from_env(platform: Platform) -> Self {
        let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
        let connect_timeout_secs: u64 = std::env::var("DB_CONNECT_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_CONNECT_TIMEOUT_SECS.to_string())
            .parse()
            .expect("DB_CONNECT_TIMEOUT_SECS must be a valid u64");

        Self {
            database_url,
            max_connections: platform.pool_size(),
            connect_timeout: Duration::from_secs(connect_timeout_secs),
        }
    }
}

/// Create a connection pool.
///
/// An exhausted pool fails the request after `connect_timeout` instead of
/// queueing indefinitely.
pub async fn create_pool(config: &DbConfig) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.connect_timeout)
        .connect(&config.database_url)
        .await
}

/// Round-trip a trivial query to confirm the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply pending migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}
