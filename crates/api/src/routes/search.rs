//! Search and search-configuration routes.

use axum::routing::get;
use axum::Router;

use crate::handlers::{search, search_config};
use crate::state::AppState;

/// Routes mounted at `/search`.
///
/// ```text
/// GET /?q=&scope=&location=&category=   -> search
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(search::search))
}

/// Routes mounted at `/search-configs`.
///
/// ```text
/// GET    /                      -> list
/// POST   /                      -> create
/// GET    /context/{context}     -> get_active
/// GET    /{id}                  -> get_by_id
/// PUT    /{id}                  -> update
/// DELETE /{id}                  -> delete
/// ```
pub fn config_router() -> Router<AppState> {
    Router::new()
        .route("/", get(search_config::list).post(search_config::create))
        .route("/context/{context}", get(search_config::get_active))
        .route(
            "/{id}",
            get(search_config::get_by_id)
                .put(search_config::update)
                .delete(search_config::delete),
        )
}
