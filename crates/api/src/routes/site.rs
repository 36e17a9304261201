//! Site settings and the motivation page.

use axum::routing::{delete, get, put};
use axum::Router;

use crate::handlers::{motivation, site_settings};
use crate::state::AppState;

/// Public routes, mounted at `/api`.
///
/// ```text
/// GET /site-settings                -> site_settings::get
/// GET /motivation                   -> motivation::get_public
/// GET /motivation/image-locations   -> motivation::list_image_locations
/// ```
pub fn public_router() -> Router<AppState> {
    Router::new()
        .route("/site-settings", get(site_settings::get))
        .route("/motivation", get(motivation::get_public))
        .route(
            "/motivation/image-locations",
            get(motivation::list_image_locations),
        )
}

/// Editor routes, mounted at `/api/admin`.
///
/// ```text
/// PUT    /site-settings                      -> site_settings::update
/// GET    /motivation                         -> motivation::get_admin
/// PUT    /motivation                         -> motivation::update
/// PUT    /motivation/image-locations         -> motivation::upsert_image_location
/// DELETE /motivation/image-locations/{id}    -> motivation::delete_image_location
/// ```
pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/site-settings", put(site_settings::update))
        .route(
            "/motivation",
            get(motivation::get_admin).put(motivation::update),
        )
        .route(
            "/motivation/image-locations",
            put(motivation::upsert_image_location),
        )
        .route(
            "/motivation/image-locations/{id}",
            delete(motivation::delete_image_location),
        )
}
