//! Handlers shared by the five ranked content types.
//!
//! The read shapes, soft delete, restore, hard delete and ranking are
//! identical across types and are instantiated per type in the routes
//! (`content::list_published::<Destination>`). Create and update live in
//! the per-type handler modules and call [`prepare_create`],
//! [`prepare_update`] and [`finish_update`].

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use ontdek_core::content::ContentKind;
use ontdek_core::error::CoreError;
use ontdek_core::ranking::next_slot;
use ontdek_core::slug::{ensure_not_reserved, slugify, validate_slug};
use ontdek_core::types::DbId;
use ontdek_db::models::ContentInput;
use ontdek_db::repositories::{RankedEntity, RankedRepo, RankingChange};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAuth, RequireDelete, RequireEdit};
use crate::state::AppState;

/// Request body for `PATCH /api/<r>/{id}/ranking`.
#[derive(Debug, Deserialize)]
pub struct SetRankingRequest {
    pub ranking: i32,
}

/// 404 for a missing or trashed row of `kind`.
pub fn not_found(kind: ContentKind, id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: kind.label(),
        id,
    })
}

// ---------------------------------------------------------------------------
// Public reads
// ---------------------------------------------------------------------------

/// GET /api/<r>
pub async fn list_published<T: RankedEntity>(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<T>>> {
    Ok(Json(RankedRepo::list_published::<T>(&state.pool).await?))
}

/// GET /api/<r>/homepage
pub async fn list_homepage<T: RankedEntity>(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<T>>> {
    Ok(Json(RankedRepo::list_homepage::<T>(&state.pool).await?))
}

/// GET /api/<r>/{slug}
///
/// The lookup matches every row with the slug; only a live, published one
/// is returned. Anything else is a 404.
pub async fn get_by_slug<T: RankedEntity>(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<T>> {
    RankedRepo::find_by_slug::<T>(&state.pool, &slug)
        .await?
        .into_iter()
        .find(|row| row.is_publicly_visible())
        .map(Json)
        .ok_or(AppError::Core(CoreError::SlugNotFound {
            entity: T::KIND.label(),
            slug,
        }))
}

// ---------------------------------------------------------------------------
// Admin reads
// ---------------------------------------------------------------------------

/// GET /api/admin/<r>
pub async fn list_admin<T: RankedEntity>(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<T>>> {
    Ok(Json(RankedRepo::list_admin::<T>(&state.pool).await?))
}

/// GET /api/admin/<r>/trash
pub async fn list_trash<T: RankedEntity>(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<T>>> {
    Ok(Json(RankedRepo::list_trash::<T>(&state.pool).await?))
}

// ---------------------------------------------------------------------------
// Lifecycle
// ---------------------------------------------------------------------------

/// PATCH /api/<r>/{id}/soft-delete
pub async fn soft_delete<T: RankedEntity>(
    RequireDelete(user): RequireDelete,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !RankedRepo::soft_delete(&state.pool, T::KIND, id).await? {
        return Err(not_found(T::KIND, id));
    }
    tracing::info!(kind = %T::KIND, id, user_id = user.user_id, "Moved to trash");
    Ok(StatusCode::NO_CONTENT)
}

/// PATCH /api/<r>/{id}/restore
///
/// The row comes back at its stored ranking. Fails with 409 if a live row
/// took its slug while it was in the trash.
pub async fn restore<T: RankedEntity>(
    RequireEdit(user): RequireEdit,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<T>> {
    let row = RankedRepo::find_state(&state.pool, T::KIND, id)
        .await?
        .ok_or_else(|| not_found(T::KIND, id))?;
    if !row.is_deleted {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "{} met id {id} staat niet in de prullenbak",
            T::KIND.label()
        ))));
    }
    if RankedRepo::slug_taken(&state.pool, T::KIND, &row.slug, Some(id)).await? {
        return Err(slug_conflict(T::KIND, &row.slug));
    }

    if !RankedRepo::restore(&state.pool, T::KIND, id).await? {
        return Err(not_found(T::KIND, id));
    }
    tracing::info!(kind = %T::KIND, id, user_id = user.user_id, "Restored from trash");

    let restored = RankedRepo::find_by_id::<T>(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(T::KIND, id))?;
    Ok(Json(restored))
}

/// DELETE /api/<r>/{id}
///
/// Permanent. The row's local image is unlinked afterwards; a failed unlink
/// is logged and does not fail the request.
pub async fn hard_delete<T: RankedEntity>(
    RequireDelete(user): RequireDelete,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let removed = RankedRepo::hard_delete(&state.pool, T::KIND, id)
        .await?
        .ok_or_else(|| not_found(T::KIND, id))?;
    tracing::info!(kind = %T::KIND, id, user_id = user.user_id, "Permanently deleted");

    if let Some(image) = removed.image.as_deref().filter(|p| is_local_image(p)) {
        if state.config.uploads_enabled() {
            state.assets.remove_best_effort(image).await;
        }
    }
    Ok(StatusCode::NO_CONTENT)
}

/// PATCH /api/<r>/{id}/ranking
pub async fn set_ranking<T: RankedEntity>(
    RequireEdit(_user): RequireEdit,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<SetRankingRequest>,
) -> AppResult<Json<RankingChange>> {
    let change = RankedRepo::set_ranking(
        &state.pool,
        T::KIND,
        id,
        input.ranking,
        state.config.ranking_bounds,
    )
    .await?
    .ok_or_else(|| not_found(T::KIND, id))?;
    Ok(Json(change))
}

// ---------------------------------------------------------------------------
// Create / update helpers
// ---------------------------------------------------------------------------

/// Derive the slug and ranking for a new row.
///
/// An explicit slug is validated as-is; otherwise it is derived from the
/// title. Reserved slugs such as `homepage` are refused. The ranking
/// defaults to the end of the live set.
pub async fn prepare_create<I: ContentInput>(
    state: &AppState,
    kind: ContentKind,
    input: &I,
) -> AppResult<(String, i32)> {
    let slug = match input.slug() {
        Some(explicit) => {
            validate_slug(explicit)?;
            explicit.to_string()
        }
        None => slugify(input.title().unwrap_or_default())?,
    };
    ensure_not_reserved(&slug)?;
    if RankedRepo::slug_taken(&state.pool, kind, &slug, None).await? {
        return Err(slug_conflict(kind, &slug));
    }

    let ranking = match input.ranking() {
        Some(ranking) => ranking,
        None => next_slot(RankedRepo::live_count(&state.pool, kind).await?),
    };
    Ok((slug, ranking))
}

/// Resolve the new slug for an update, if any.
///
/// An explicit slug wins; a new title without one regenerates the slug.
pub async fn prepare_update<I: ContentInput>(
    state: &AppState,
    kind: ContentKind,
    id: DbId,
    input: &I,
) -> AppResult<Option<String>> {
    let slug = match (input.slug(), input.title()) {
        (Some(explicit), _) => {
            validate_slug(explicit)?;
            Some(explicit.to_string())
        }
        (None, Some(title)) => Some(slugify(title)?),
        (None, None) => None,
    };
    if let Some(ref slug) = slug {
        ensure_not_reserved(slug)?;
        if RankedRepo::slug_taken(&state.pool, kind, slug, Some(id)).await? {
            return Err(slug_conflict(kind, slug));
        }
    }
    Ok(slug)
}

/// Apply a requested ranking change after a field update and return the
/// fresh row.
pub async fn finish_update<T: RankedEntity>(
    state: &AppState,
    id: DbId,
    ranking: Option<i32>,
) -> AppResult<T> {
    if let Some(requested) = ranking {
        RankedRepo::set_ranking(
            &state.pool,
            T::KIND,
            id,
            requested,
            state.config.ranking_bounds,
        )
        .await?
        .ok_or_else(|| not_found(T::KIND, id))?;
    }
    RankedRepo::find_by_id::<T>(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(T::KIND, id))
}

fn slug_conflict(kind: ContentKind, slug: &str) -> AppError {
    AppError::Core(CoreError::Conflict(format!(
        "{} met slug '{slug}' bestaat al",
        kind.label()
    )))
}

/// Stored paths served from the images root, as opposed to external URLs.
fn is_local_image(path: &str) -> bool {
    !path.is_empty() && !path.contains("://")
}
