//! Repository for the `search_configs` table.

use ontdek_core::types::DbId;
use sqlx::PgPool;

use crate::models::search_config::{CreateSearchConfig, SearchConfig, UpdateSearchConfig};

const COLUMNS: &str = "id, name, context, placeholder_text, search_scope, enable_location_filter, \
                       enable_category_filter, redirect_pattern, is_active, created_at, updated_at";

pub struct SearchConfigRepo;

impl SearchConfigRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateSearchConfig,
    ) -> Result<SearchConfig, sqlx::Error> {
        let query = format!(
            "INSERT INTO search_configs
                (name, context, placeholder_text, search_scope, enable_location_filter,
                 enable_category_filter, redirect_pattern, is_active)
             VALUES ($1, COALESCE($2, 'home'), $3, COALESCE($4, 'all'), COALESCE($5, false),
                     COALESCE($6, false), $7, COALESCE($8, true))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SearchConfig>(&query)
            .bind(&input.name)
            .bind(&input.context)
            .bind(&input.placeholder_text)
            .bind(&input.search_scope)
            .bind(input.enable_location_filter)
            .bind(input.enable_category_filter)
            .bind(&input.redirect_pattern)
            .bind(input.is_active)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<SearchConfig>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM search_configs WHERE id = $1");
        sqlx::query_as::<_, SearchConfig>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Active configuration for a page context, e.g. `home`.
    pub async fn find_active_by_context(
        pool: &PgPool,
        context: &str,
    ) -> Result<Option<SearchConfig>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM search_configs
             WHERE context = $1 AND is_active = true
             ORDER BY updated_at DESC
             LIMIT 1"
        );
        sqlx::query_as::<_, SearchConfig>(&query)
            .bind(context)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<SearchConfig>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM search_configs ORDER BY context, name");
        sqlx::query_as::<_, SearchConfig>(&query).fetch_all(pool).await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateSearchConfig,
    ) -> Result<Option<SearchConfig>, sqlx::Error> {
        let query = format!(
            "UPDATE search_configs SET
                name = COALESCE($2, name),
                context = COALESCE($3, context),
                placeholder_text = COALESCE($4, placeholder_text),
                search_scope = COALESCE($5, search_scope),
                enable_location_filter = COALESCE($6, enable_location_filter),
                enable_category_filter = COALESCE($7, enable_category_filter),
                redirect_pattern = COALESCE($8, redirect_pattern),
                is_active = COALESCE($9, is_active)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SearchConfig>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.context)
            .bind(&input.placeholder_text)
            .bind(&input.search_scope)
            .bind(input.enable_location_filter)
            .bind(input.enable_category_filter)
            .bind(&input.redirect_pattern)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM search_configs WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
