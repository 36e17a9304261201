//! Route definitions for `/admin/users`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Routes mounted at `/admin/users`.
///
/// All routes require `can_manage_users` (enforced by handler extractors).
///
/// ```text
/// GET    /                       -> list
/// POST   /                       -> create
/// GET    /{id}                   -> get_by_id
/// PUT    /{id}                   -> update
/// DELETE /{id}                   -> delete
/// POST   /{id}/reset-password    -> reset_password
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(users::list).post(users::create))
        .route(
            "/{id}",
            get(users::get_by_id)
                .put(users::update)
                .delete(users::delete),
        )
        .route("/{id}/reset-password", post(users::reset_password))
}
