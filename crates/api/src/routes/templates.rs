use axum::routing::get;
use axum::Router;

use crate::handlers::template;
use crate::state::AppState;

/// Routes mounted at `/templates`.
///
/// ```text
/// GET    /        -> list
/// POST   /        -> create
/// GET    /{id}    -> get_by_id
/// PUT    /{id}    -> update
/// DELETE /{id}    -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(template::list).post(template::create))
        .route(
            "/{id}",
            get(template::get_by_id)
                .put(template::update)
                .delete(template::delete),
        )
}
