//! Repository for the `highlights` table.

use ontdek_core::content::ContentKind;
use ontdek_core::types::DbId;
use sqlx::PgPool;

use crate::models::highlight::{CreateHighlight, Highlight, UpdateHighlight};
use crate::repositories::ranked_repo::RankedEntity;

pub struct HighlightRepo;

impl HighlightRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateHighlight,
        slug: &str,
        ranking: i32,
        created_by: Option<DbId>,
    ) -> Result<Highlight, sqlx::Error> {
        let query = format!(
            "INSERT INTO highlights
                (name, slug, location, category, icon, description, link,
                 published, show_on_homepage, ranking, created_by)
             VALUES ($1, $2, $3, $4, $5, $6, $7, COALESCE($8, $9), COALESCE($10, true), $11, $12)
             RETURNING {}",
            Highlight::COLUMNS
        );
        sqlx::query_as::<_, Highlight>(&query)
            .bind(&input.name)
            .bind(slug)
            .bind(&input.location)
            .bind(&input.category)
            .bind(&input.icon)
            .bind(&input.description)
            .bind(&input.link)
            .bind(input.published)
            .bind(ContentKind::Highlight.published_by_default())
            .bind(input.show_on_homepage)
            .bind(ranking)
            .bind(created_by)
            .fetch_one(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateHighlight,
        slug: Option<&str>,
    ) -> Result<Option<Highlight>, sqlx::Error> {
        let query = format!(
            "UPDATE highlights SET
                name = COALESCE($2, name),
                slug = COALESCE($3, slug),
                location = COALESCE($4, location),
                category = COALESCE($5, category),
                icon = COALESCE($6, icon),
                description = COALESCE($7, description),
                link = COALESCE($8, link),
                published = COALESCE($9, published),
                show_on_homepage = COALESCE($10, show_on_homepage)
             WHERE id = $1 AND is_deleted = false
             RETURNING {}",
            Highlight::COLUMNS
        );
        sqlx::query_as::<_, Highlight>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(slug)
            .bind(&input.location)
            .bind(&input.category)
            .bind(&input.icon)
            .bind(&input.description)
            .bind(&input.link)
            .bind(input.published)
            .bind(input.show_on_homepage)
            .fetch_optional(pool)
            .await
    }
}
