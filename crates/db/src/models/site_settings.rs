//! Site-wide settings (the single `database_settings` row).

use ontdek_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SiteSettings {
    pub id: DbId,
    pub site_name: String,
    pub site_description: Option<String>,
    pub background_image: Option<String>,
    pub logo_image: Option<String>,
    pub social_image: Option<String>,
    pub favicon: Option<String>,
    pub header_overlay_enabled: bool,
    pub header_overlay_opacity: i32,
    pub updated_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Partial update of the settings row.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateSiteSettings {
    #[validate(length(min = 1, max = 100, message = "Sitenaam is verplicht (maximaal 100 tekens)"))]
    pub site_name: Option<String>,
    pub site_description: Option<String>,
    pub background_image: Option<String>,
    pub logo_image: Option<String>,
    pub social_image: Option<String>,
    pub favicon: Option<String>,
    pub header_overlay_enabled: Option<bool>,
    #[validate(range(min = 0, max = 100, message = "Dekking moet tussen 0 en 100 liggen"))]
    pub header_overlay_opacity: Option<i32>,
}
