//! Repository for the `guides` table.

use ontdek_core::content::ContentKind;
use ontdek_core::types::DbId;
use sqlx::PgPool;

use crate::models::guide::{CreateGuide, Guide, UpdateGuide};
use crate::repositories::ranked_repo::RankedEntity;

pub struct GuideRepo;

impl GuideRepo {
    /// Insert a new guide at `ranking`, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateGuide,
        slug: &str,
        ranking: i32,
        created_by: Option<DbId>,
    ) -> Result<Guide, sqlx::Error> {
        let query = format!(
            "INSERT INTO guides
                (title, slug, description, content, image, alt_text,
                 published, show_on_homepage, ranking, created_by)
             VALUES ($1, $2, $3, $4, $5, $6, COALESCE($7, $8), COALESCE($9, true), $10, $11)
             RETURNING {}",
            Guide::COLUMNS
        );
        sqlx::query_as::<_, Guide>(&query)
            .bind(&input.title)
            .bind(slug)
            .bind(&input.description)
            .bind(&input.content)
            .bind(&input.image)
            .bind(&input.alt_text)
            .bind(input.published)
            .bind(ContentKind::Guide.published_by_default())
            .bind(input.show_on_homepage)
            .bind(ranking)
            .bind(created_by)
            .fetch_one(pool)
            .await
    }

    /// Update a live guide. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateGuide,
        slug: Option<&str>,
    ) -> Result<Option<Guide>, sqlx::Error> {
        let query = format!(
            "UPDATE guides SET
                title = COALESCE($2, title),
                slug = COALESCE($3, slug),
                description = COALESCE($4, description),
                content = COALESCE($5, content),
                image = COALESCE($6, image),
                alt_text = COALESCE($7, alt_text),
                published = COALESCE($8, published),
                show_on_homepage = COALESCE($9, show_on_homepage)
             WHERE id = $1 AND is_deleted = false
             RETURNING {}",
            Guide::COLUMNS
        );
        sqlx::query_as::<_, Guide>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(slug)
            .bind(&input.description)
            .bind(&input.content)
            .bind(&input.image)
            .bind(&input.alt_text)
            .bind(input.published)
            .bind(input.show_on_homepage)
            .fetch_optional(pool)
            .await
    }
}
