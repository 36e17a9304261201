//! Create and update handlers for `/api/guides`.
//!
//! Reads, ranking and the delete lifecycle are the shared handlers in
//! [`super::content`].

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use ontdek_core::content::ContentKind;
use ontdek_core::types::DbId;
use ontdek_db::models::guide::{CreateGuide, Guide, UpdateGuide};
use ontdek_db::repositories::GuideRepo;
use validator::Validate;

use super::content;
use crate::error::AppResult;
use crate::middleware::rbac::{RequireCreate, RequireEdit};
use crate::state::AppState;

const KIND: ContentKind = ContentKind::Guide;

/// POST /api/guides
pub async fn create(
    RequireCreate(user): RequireCreate,
    State(state): State<AppState>,
    Json(input): Json<CreateGuide>,
) -> AppResult<(StatusCode, Json<Guide>)> {
    input.validate()?;
    let (slug, ranking) = content::prepare_create(&state, KIND, &input).await?;
    let row = GuideRepo::create(&state.pool, &input, &slug, ranking, Some(user.user_id)).await?;
    tracing::info!(kind = %KIND, id = row.id, slug = %row.slug, "Created");
    Ok((StatusCode::CREATED, Json(row)))
}

/// PUT /api/guides/{id}
pub async fn update(
    RequireEdit(_user): RequireEdit,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateGuide>,
) -> AppResult<Json<Guide>> {
    input.validate()?;
    let slug = content::prepare_update(&state, KIND, id, &input).await?;
    GuideRepo::update(&state.pool, id, &input, slug.as_deref())
        .await?
        .ok_or_else(|| content::not_found(KIND, id))?;
    let row = content::finish_update::<Guide>(&state, id, input.ranking).await?;
    Ok(Json(row))
}
