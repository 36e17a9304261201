//! Route definitions for login and session management.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Top-level login/logout, mounted at `/api`.
///
/// ```text
/// POST /login    -> login
/// POST /logout   -> logout (requires auth)
/// ```
pub fn session_router() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
}

/// Routes mounted at `/auth`.
///
/// ```text
/// GET  /status           -> status
/// POST /refresh          -> refresh
/// POST /change-password  -> change_password (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/status", get(auth::status))
        .route("/refresh", post(auth::refresh))
        .route("/change-password", post(auth::change_password))
}
