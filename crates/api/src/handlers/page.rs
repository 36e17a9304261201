//! Create and update handlers for `/api/pages`.
//!
//! Reads, ranking and the delete lifecycle are the shared handlers in
//! [`super::content`].

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use ontdek_core::content::ContentKind;
use ontdek_core::types::DbId;
use ontdek_db::models::page::{CreatePage, Page, UpdatePage};
use ontdek_db::repositories::PageRepo;
use validator::Validate;

use super::content;
use crate::error::AppResult;
use crate::middleware::rbac::{RequireCreate, RequireEdit};
use crate::state::AppState;

const KIND: ContentKind = ContentKind::Page;

/// POST /api/pages
pub async fn create(
    RequireCreate(user): RequireCreate,
    State(state): State<AppState>,
    Json(input): Json<CreatePage>,
) -> AppResult<(StatusCode, Json<Page>)> {
    input.validate()?;
    let (slug, ranking) = content::prepare_create(&state, KIND, &input).await?;
    let row = PageRepo::create(&state.pool, &input, &slug, ranking, Some(user.user_id)).await?;
    tracing::info!(kind = %KIND, id = row.id, slug = %row.slug, "Created");
    Ok((StatusCode::CREATED, Json(row)))
}

/// PUT /api/pages/{id}
pub async fn update(
    RequireEdit(_user): RequireEdit,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdatePage>,
) -> AppResult<Json<Page>> {
    input.validate()?;
    let slug = content::prepare_update(&state, KIND, id, &input).await?;
    PageRepo::update(&state.pool, id, &input, slug.as_deref())
        .await?
        .ok_or_else(|| content::not_found(KIND, id))?;
    let row = content::finish_update::<Page>(&state, id, input.ranking).await?;
    Ok(Json(row))
}
