//! Handlers for the `/templates` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use ontdek_core::error::CoreError;
use ontdek_core::types::DbId;
use ontdek_db::models::template::{CreateTemplate, Template, UpdateTemplate};
use ontdek_db::repositories::TemplateRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireCreate, RequireDelete, RequireEdit};
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Sjabloon",
        id,
    })
}

/// `fields` must be a JSON array of layout slots.
fn check_fields(fields: Option<&serde_json::Value>) -> AppResult<()> {
    match fields {
        Some(value) if !value.is_array() => Err(AppError::BadRequest(
            "Velden moeten een lijst zijn".into(),
        )),
        _ => Ok(()),
    }
}

/// GET /api/templates
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Template>>> {
    Ok(Json(TemplateRepo::list(&state.pool).await?))
}

/// GET /api/templates/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Template>> {
    let template = TemplateRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(template))
}

/// POST /api/templates
pub async fn create(
    RequireCreate(user): RequireCreate,
    State(state): State<AppState>,
    Json(input): Json<CreateTemplate>,
) -> AppResult<(StatusCode, Json<Template>)> {
    input.validate()?;
    check_fields(input.fields.as_ref())?;
    let template = TemplateRepo::create(&state.pool, &input, Some(user.user_id)).await?;
    Ok((StatusCode::CREATED, Json(template)))
}

/// PUT /api/templates/{id}
pub async fn update(
    RequireEdit(_user): RequireEdit,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTemplate>,
) -> AppResult<Json<Template>> {
    input.validate()?;
    check_fields(input.fields.as_ref())?;
    let template = TemplateRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(template))
}

/// DELETE /api/templates/{id}
pub async fn delete(
    RequireDelete(_user): RequireDelete,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if TemplateRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}
