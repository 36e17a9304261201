use axum::routing::get;
use axum::Router;

use crate::handlers::diagnostics;
use crate::state::AppState;

/// Routes mounted at `/admin`. All require the admin flag.
///
/// ```text
/// GET  /database/status               -> database_status
/// GET  /database/connection-test      -> connection_test
/// GET  /database/tables               -> tables
/// GET  /system/health                 -> system_health
/// GET  /environment/validate          -> environment
/// GET  /deployment/config             -> current_deployment_config
/// GET  /deployment/config/{platform}  -> deployment_config_for
/// POST /deployment/config/{platform}  -> generate_deployment_config
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/database/status", get(diagnostics::database_status))
        .route(
            "/database/connection-test",
            get(diagnostics::connection_test),
        )
        .route("/database/tables", get(diagnostics::tables))
        .route("/system/health", get(diagnostics::system_health))
        .route("/environment/validate", get(diagnostics::environment))
        .route(
            "/deployment/config",
            get(diagnostics::current_deployment_config),
        )
        .route(
            "/deployment/config/{platform}",
            get(diagnostics::deployment_config_for)
                .post(diagnostics::generate_deployment_config),
        )
}
