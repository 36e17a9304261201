//! Read-only database diagnostics for the admin panel.

use ontdek_core::types::Timestamp;
use serde::Serialize;
use sqlx::{FromRow, PgPool};

/// Tables whose row counts are reported.
pub const APPLICATION_TABLES: &[&str] = &[
    "users",
    "sessions",
    "destinations",
    "guides",
    "pages",
    "activities",
    "highlights",
    "templates",
    "search_configs",
    "database_settings",
    "motivation",
    "motivation_image_locations",
];

#[derive(Debug, Clone, Serialize)]
pub struct TableCount {
    pub table: &'static str,
    pub rows: i64,
}

/// Server facts for the connection test.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ServerInfo {
    pub version: String,
    pub database: String,
    pub db_user: String,
    pub server_time: Timestamp,
}

/// Pool statistics at the time of the call.
#[derive(Debug, Clone, Serialize)]
pub struct PoolStats {
    pub size: u32,
    pub idle: usize,
    pub max_connections: u32,
}

pub struct DiagnosticsRepo;

impl DiagnosticsRepo {
    pub async fn server_info(pool: &PgPool) -> Result<ServerInfo, sqlx::Error> {
        sqlx::query_as::<_, ServerInfo>(
            "SELECT version() AS version,
                    current_database()::TEXT AS database,
                    current_user::TEXT AS db_user,
                    NOW() AS server_time",
        )
        .fetch_one(pool)
        .await
    }

    /// Row count per application table.
    pub async fn table_counts(pool: &PgPool) -> Result<Vec<TableCount>, sqlx::Error> {
        let mut counts = Vec::with_capacity(APPLICATION_TABLES.len());
        for &table in APPLICATION_TABLES {
            let (rows,): (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
                .fetch_one(pool)
                .await?;
            counts.push(TableCount { table, rows });
        }
        Ok(counts)
    }

    pub fn pool_stats(pool: &PgPool) -> PoolStats {
        PoolStats {
            size: pool.size(),
            idle: pool.num_idle(),
            max_connections: pool.options().get_max_connections(),
        }
    }
}
