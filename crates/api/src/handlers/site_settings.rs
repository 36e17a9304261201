//! Handlers for the site-wide settings row.

use axum::extract::State;
use axum::Json;
use ontdek_db::models::site_settings::{SiteSettings, UpdateSiteSettings};
use ontdek_db::repositories::SiteSettingsRepo;
use validator::Validate;

use crate::error::AppResult;
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// GET /api/site-settings
pub async fn get(State(state): State<AppState>) -> AppResult<Json<SiteSettings>> {
    Ok(Json(SiteSettingsRepo::get(&state.pool).await?))
}

/// PUT /api/admin/site-settings
pub async fn update(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<UpdateSiteSettings>,
) -> AppResult<Json<SiteSettings>> {
    input.validate()?;
    let settings = SiteSettingsRepo::update(&state.pool, &input, Some(admin.user_id)).await?;
    tracing::info!(user_id = admin.user_id, "Site settings updated");
    Ok(Json(settings))
}
