//! Repository for the `templates` table.

use ontdek_core::types::DbId;
use sqlx::PgPool;

use crate::models::template::{CreateTemplate, Template, UpdateTemplate};

const COLUMNS: &str = "id, name, description, content, fields, created_by, created_at, updated_at";

pub struct TemplateRepo;

impl TemplateRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateTemplate,
        created_by: Option<DbId>,
    ) -> Result<Template, sqlx::Error> {
        let query = format!(
            "INSERT INTO templates (name, description, content, fields, created_by)
             VALUES ($1, $2, $3, COALESCE($4, '[]'::jsonb), $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Template>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.content)
            .bind(&input.fields)
            .bind(created_by)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Template>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM templates WHERE id = $1");
        sqlx::query_as::<_, Template>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all templates alphabetically.
    pub async fn list(pool: &PgPool) -> Result<Vec<Template>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM templates ORDER BY name ASC");
        sqlx::query_as::<_, Template>(&query).fetch_all(pool).await
    }

    /// Update a template. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTemplate,
    ) -> Result<Option<Template>, sqlx::Error> {
        let query = format!(
            "UPDATE templates SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                content = COALESCE($4, content),
                fields = COALESCE($5, fields)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Template>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.content)
            .bind(&input.fields)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a template. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM templates WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
