//! Repository for the single-row `database_settings` table.

use ontdek_core::types::DbId;
use sqlx::PgPool;

use crate::models::site_settings::{SiteSettings, UpdateSiteSettings};

const COLUMNS: &str = "id, site_name, site_description, background_image, logo_image, \
                       social_image, favicon, header_overlay_enabled, header_overlay_opacity, \
                       updated_by, created_at, updated_at";

pub struct SiteSettingsRepo;

impl SiteSettingsRepo {
    /// The settings row. Seeded by the migration, so absence means a broken schema.
    pub async fn get(pool: &PgPool) -> Result<SiteSettings, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM database_settings WHERE id = 1");
        sqlx::query_as::<_, SiteSettings>(&query).fetch_one(pool).await
    }

    pub async fn update(
        pool: &PgPool,
        input: &UpdateSiteSettings,
        updated_by: Option<DbId>,
    ) -> Result<SiteSettings, sqlx::Error> {
        let query = format!(
            "UPDATE database_settings SET
                site_name = COALESCE($1, site_name),
                site_description = COALESCE($2, site_description),
                background_image = COALESCE($3, background_image),
                logo_image = COALESCE($4, logo_image),
                social_image = COALESCE($5, social_image),
                favicon = COALESCE($6, favicon),
                header_overlay_enabled = COALESCE($7, header_overlay_enabled),
                header_overlay_opacity = COALESCE($8, header_overlay_opacity),
                updated_by = $9
             WHERE id = 1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SiteSettings>(&query)
            .bind(&input.site_name)
            .bind(&input.site_description)
            .bind(&input.background_image)
            .bind(&input.logo_image)
            .bind(&input.social_image)
            .bind(&input.favicon)
            .bind(input.header_overlay_enabled)
            .bind(input.header_overlay_opacity)
            .bind(updated_by)
            .fetch_one(pool)
            .await
    }
}
