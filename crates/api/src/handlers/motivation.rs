//! Handlers for the homepage motivation block and its location images.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use ontdek_core::error::CoreError;
use ontdek_core::types::DbId;
use ontdek_db::models::motivation::{
    Motivation, MotivationImageLocation, UpdateMotivation, UpsertMotivationImageLocation,
};
use ontdek_db::repositories::MotivationRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAuth, RequireDelete, RequireEdit};
use crate::state::AppState;

/// GET /api/motivation
///
/// 404 while the block is unpublished.
pub async fn get_public(State(state): State<AppState>) -> AppResult<Json<Motivation>> {
    let motivation = MotivationRepo::get(&state.pool).await?;
    if !motivation.published {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Motivatie",
            id: motivation.id,
        }));
    }
    Ok(Json(motivation))
}

/// GET /api/admin/motivation
pub async fn get_admin(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
) -> AppResult<Json<Motivation>> {
    Ok(Json(MotivationRepo::get(&state.pool).await?))
}

/// PUT /api/admin/motivation
pub async fn update(
    RequireEdit(user): RequireEdit,
    State(state): State<AppState>,
    Json(input): Json<UpdateMotivation>,
) -> AppResult<Json<Motivation>> {
    input.validate()?;
    let motivation = MotivationRepo::update(&state.pool, &input, Some(user.user_id)).await?;
    Ok(Json(motivation))
}

/// GET /api/motivation/image-locations
pub async fn list_image_locations(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<MotivationImageLocation>>> {
    Ok(Json(MotivationRepo::list_image_locations(&state.pool).await?))
}

/// PUT /api/admin/motivation/image-locations
pub async fn upsert_image_location(
    RequireEdit(_user): RequireEdit,
    State(state): State<AppState>,
    Json(input): Json<UpsertMotivationImageLocation>,
) -> AppResult<Json<MotivationImageLocation>> {
    input.validate()?;
    let location = MotivationRepo::upsert_image_location(&state.pool, &input).await?;
    Ok(Json(location))
}

/// DELETE /api/admin/motivation/image-locations/{id}
pub async fn delete_image_location(
    RequireDelete(_user): RequireDelete,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if MotivationRepo::delete_image_location(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Afbeeldingslocatie",
            id,
        }))
    }
}
