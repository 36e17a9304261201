//! Upload and image-folder routes.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::upload;
use crate::state::AppState;

/// Public and editor routes, mounted at `/api`.
///
/// ```text
/// POST   /upload                                -> upload
/// POST   /upload/favicon                        -> upload_favicon
/// GET    /favicons                              -> list_favicons
/// DELETE /favicons/{filename}                   -> delete_favicon
/// GET    /site-images/{image_type}              -> list_site_images
/// DELETE /site-images/{image_type}/{filename}   -> delete_site_image
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/upload", post(upload::upload))
        .route("/upload/favicon", post(upload::upload_favicon))
        .route("/favicons", get(upload::list_favicons))
        .route("/favicons/{filename}", delete(upload::delete_favicon))
        .route("/site-images/{image_type}", get(upload::list_site_images))
        .route(
            "/site-images/{image_type}/{filename}",
            delete(upload::delete_site_image),
        )
}

/// Routes mounted at `/admin/uploads`.
///
/// ```text
/// GET    /{destination}/trash?location=   -> list_upload_trash
/// DELETE /{destination}/trash?location=   -> purge_upload_trash (admin)
/// ```
pub fn admin_router() -> Router<AppState> {
    Router::new().route(
        "/{destination}/trash",
        get(upload::list_upload_trash).delete(upload::purge_upload_trash),
    )
}
