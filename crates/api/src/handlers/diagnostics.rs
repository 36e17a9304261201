//! Read-only admin diagnostics: database, system and deployment helpers.

use std::time::Instant;

use axum::extract::{Path, Query, State};
use axum::Json;
use ontdek_core::platform::{
    deployment_config, validate_environment, DeploymentConfig, DeploymentOptions,
    EnvironmentReport, Platform,
};
use ontdek_db::repositories::diagnostics_repo::{PoolStats, ServerInfo, TableCount};
use ontdek_db::repositories::DiagnosticsRepo;
use serde::Serialize;

use crate::error::AppResult;
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct DatabaseStatus {
    pub connected: bool,
    pub platform: Platform,
    pub pool: PoolStats,
    /// Present when the health query failed.
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ConnectionTest {
    #[serde(flatten)]
    pub server: ServerInfo,
    pub latency_ms: u64,
}

#[derive(Debug, Serialize)]
pub struct SystemHealth {
    pub status: &'static str,
    pub version: &'static str,
    pub app_env: String,
    pub platform: Platform,
    pub uploads_enabled: bool,
    pub db_healthy: bool,
}

/// GET /api/admin/database/status
///
/// Reports a failed health query in the body instead of failing the request.
pub async fn database_status(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DatabaseStatus>> {
    let error = ontdek_db::health_check(&state.pool)
        .await
        .err()
        .map(|e| e.to_string());
    if let Some(ref e) = error {
        tracing::warn!(error = %e, "Database status check failed");
    }
    Ok(Json(DatabaseStatus {
        connected: error.is_none(),
        platform: state.config.platform,
        pool: DiagnosticsRepo::pool_stats(&state.pool),
        error,
    }))
}

/// GET /api/admin/database/connection-test
pub async fn connection_test(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<ConnectionTest>> {
    let started = Instant::now();
    let server = DiagnosticsRepo::server_info(&state.pool).await?;
    Ok(Json(ConnectionTest {
        server,
        latency_ms: u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
    }))
}

/// GET /api/admin/database/tables
pub async fn tables(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<TableCount>>> {
    Ok(Json(DiagnosticsRepo::table_counts(&state.pool).await?))
}

/// GET /api/admin/system/health
pub async fn system_health(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<SystemHealth>> {
    let db_healthy = ontdek_db::health_check(&state.pool).await.is_ok();
    Ok(Json(SystemHealth {
        status: if db_healthy { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        app_env: state.config.app_env.clone(),
        platform: state.config.platform,
        uploads_enabled: state.config.uploads_enabled(),
        db_healthy,
    }))
}

/// GET /api/admin/environment/validate
pub async fn environment(RequireAdmin(_admin): RequireAdmin) -> Json<EnvironmentReport> {
    Json(validate_environment(|name| std::env::var(name).ok()))
}

/// GET /api/admin/deployment/config
///
/// Config for the platform the server is running on.
pub async fn current_deployment_config(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(options): Query<DeploymentOptions>,
) -> Json<DeploymentConfig> {
    Json(deployment_config(state.config.platform, &options))
}

/// GET /api/admin/deployment/config/{platform}
pub async fn deployment_config_for(
    RequireAdmin(_admin): RequireAdmin,
    Path(platform): Path<String>,
    Query(options): Query<DeploymentOptions>,
) -> AppResult<Json<DeploymentConfig>> {
    let platform: Platform = platform.parse()?;
    Ok(Json(deployment_config(platform, &options)))
}

/// POST /api/admin/deployment/config/{platform}
pub async fn generate_deployment_config(
    RequireAdmin(_admin): RequireAdmin,
    Path(platform): Path<String>,
    Json(options): Json<DeploymentOptions>,
) -> AppResult<Json<DeploymentConfig>> {
    let platform: Platform = platform.parse()?;
    Ok(Json(deployment_config(platform, &options)))
}
