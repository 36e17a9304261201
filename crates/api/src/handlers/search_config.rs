//! Handlers for the `/search-configs` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use ontdek_core::error::CoreError;
use ontdek_core::search::SearchScope;
use ontdek_core::types::DbId;
use ontdek_db::models::search_config::{CreateSearchConfig, SearchConfig, UpdateSearchConfig};
use ontdek_db::repositories::SearchConfigRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAdmin, RequireAuth};
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Zoekconfiguratie",
        id,
    })
}

fn check_scope(scope: Option<&str>) -> AppResult<()> {
    if let Some(scope) = scope {
        scope.parse::<SearchScope>()?;
    }
    Ok(())
}

/// GET /api/search-configs/context/{context}
///
/// The active configuration for a page context, used by the public site.
pub async fn get_active(
    State(state): State<AppState>,
    Path(context): Path<String>,
) -> AppResult<Json<SearchConfig>> {
    SearchConfigRepo::find_active_by_context(&state.pool, &context)
        .await?
        .map(Json)
        .ok_or_else(|| {
            AppError::Core(CoreError::SlugNotFound {
                entity: "Zoekconfiguratie",
                slug: context,
            })
        })
}

/// GET /api/search-configs
pub async fn list(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<SearchConfig>>> {
    Ok(Json(SearchConfigRepo::list(&state.pool).await?))
}

/// GET /api/search-configs/{id}
pub async fn get_by_id(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<SearchConfig>> {
    let config = SearchConfigRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(config))
}

/// POST /api/search-configs
pub async fn create(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateSearchConfig>,
) -> AppResult<(StatusCode, Json<SearchConfig>)> {
    input.validate()?;
    check_scope(input.search_scope.as_deref())?;
    let config = SearchConfigRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(config)))
}

/// PUT /api/search-configs/{id}
pub async fn update(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateSearchConfig>,
) -> AppResult<Json<SearchConfig>> {
    input.validate()?;
    check_scope(input.search_scope.as_deref())?;
    let config = SearchConfigRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(config))
}

/// DELETE /api/search-configs/{id}
pub async fn delete(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if SearchConfigRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}
