//! Route definitions shared by the ranked content types.

use axum::routing::{get, patch, MethodRouter};
use axum::Router;
use ontdek_db::repositories::RankedEntity;

use crate::handlers::content;
use crate::state::AppState;

/// Public and editor routes for one ranked type, mounted at `/<r>`.
///
/// `create` and `update` are the type's own handlers.
///
/// ```text
/// GET    /                    -> list_published
/// POST   /                    -> create
/// GET    /homepage            -> list_homepage
/// GET    /{key}               -> get_by_slug
/// PUT    /{key}               -> update (numeric id)
/// DELETE /{key}               -> hard_delete (numeric id)
/// PATCH  /{key}/soft-delete   -> soft_delete
/// PATCH  /{key}/restore       -> restore
/// PATCH  /{key}/ranking       -> set_ranking
/// ```
pub fn ranked_router<T: RankedEntity>(
    create: MethodRouter<AppState>,
    update: MethodRouter<AppState>,
) -> Router<AppState> {
    Router::new()
        .route("/", get(content::list_published::<T>).merge(create))
        .route("/homepage", get(content::list_homepage::<T>))
        .route(
            "/{key}",
            get(content::get_by_slug::<T>)
                .merge(update)
                .delete(content::hard_delete::<T>),
        )
        .route("/{key}/soft-delete", patch(content::soft_delete::<T>))
        .route("/{key}/restore", patch(content::restore::<T>))
        .route("/{key}/ranking", patch(content::set_ranking::<T>))
}

/// Admin views for one ranked type, mounted at `/admin/<r>`.
///
/// ```text
/// GET /        -> list_admin
/// GET /trash   -> list_trash
/// ```
pub fn admin_ranked_router<T: RankedEntity>() -> Router<AppState> {
    Router::new()
        .route("/", get(content::list_admin::<T>))
        .route("/trash", get(content::list_trash::<T>))
}
