pub mod auth;
pub mod content;
pub mod diagnostics;
pub mod health;
pub mod search;
pub mod site;
pub mod templates;
pub mod upload;
pub mod users;

use axum::routing::{post, put};
use axum::Router;
use ontdek_db::models::activity::Activity;
use ontdek_db::models::destination::Destination;
use ontdek_db::models::guide::Guide;
use ontdek_db::models::highlight::Highlight;
use ontdek_db::models::page::Page;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /login, /logout                                  session
/// /auth/status, /auth/refresh, /auth/change-password
///
/// /destinations, /guides, /pages,                  ranked content (public
/// /activities, /highlights                         reads, editor writes)
///     /                  list published, create
///     /homepage          homepage subset
///     /{key}             by slug, update, hard delete
///     /{key}/soft-delete
///     /{key}/restore
///     /{key}/ranking
///
/// /templates                                       CRUD
/// /search-configs                                  CRUD + active per context
/// /search                                          cross-type search
/// /site-settings, /motivation                      public reads
/// /upload, /favicons, /site-images                 image files
///
/// /admin/<ranked type>                             all live rows
/// /admin/<ranked type>/trash                       soft-deleted rows
/// /admin/users                                     user management
/// /admin/uploads/{destination}/trash               upload archive
/// /admin/site-settings, /admin/motivation          editor writes
/// /admin/database/*, /admin/system/health,         diagnostics (admin)
/// /admin/environment/validate, /admin/deployment/*
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(auth::session_router())
        .nest("/auth", auth::router())
        // Ranked content.
        .nest(
            "/destinations",
            content::ranked_router::<Destination>(
                post(handlers::destination::create),
                put(handlers::destination::update),
            ),
        )
        .nest(
            "/guides",
            content::ranked_router::<Guide>(
                post(handlers::guide::create),
                put(handlers::guide::update),
            ),
        )
        .nest(
            "/pages",
            content::ranked_router::<Page>(
                post(handlers::page::create),
                put(handlers::page::update),
            ),
        )
        .nest(
            "/activities",
            content::ranked_router::<Activity>(
                post(handlers::activity::create),
                put(handlers::activity::update),
            ),
        )
        .nest(
            "/highlights",
            content::ranked_router::<Highlight>(
                post(handlers::highlight::create),
                put(handlers::highlight::update),
            ),
        )
        .nest("/templates", templates::router())
        .nest("/search-configs", search::config_router())
        .nest("/search", search::router())
        .merge(site::public_router())
        .merge(upload::router())
        // Admin views.
        .nest("/admin/destinations", content::admin_ranked_router::<Destination>())
        .nest("/admin/guides", content::admin_ranked_router::<Guide>())
        .nest("/admin/pages", content::admin_ranked_router::<Page>())
        .nest("/admin/activities", content::admin_ranked_router::<Activity>())
        .nest("/admin/highlights", content::admin_ranked_router::<Highlight>())
        .nest("/admin/users", users::router())
        .nest("/admin/uploads", upload::admin_router())
        .nest(
            "/admin",
            site::admin_router().merge(diagnostics::router()),
        )
}
