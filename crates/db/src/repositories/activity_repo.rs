//! Repository for the `activities` table.

use ontdek_core::content::ContentKind;
use ontdek_core::types::DbId;
use sqlx::PgPool;

use crate::models::activity::{Activity, CreateActivity, UpdateActivity};
use crate::repositories::ranked_repo::RankedEntity;

pub struct ActivityRepo;

impl ActivityRepo {
    /// Insert a new activity at `ranking`, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateActivity,
        slug: &str,
        ranking: i32,
        created_by: Option<DbId>,
    ) -> Result<Activity, sqlx::Error> {
        let query = format!(
            "INSERT INTO activities
                (name, slug, location, category, description, content, image, alt_text, link,
                 published, show_on_homepage, ranking, created_by)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9,
                     COALESCE($10, $11), COALESCE($12, true), $13, $14)
             RETURNING {}",
            Activity::COLUMNS
        );
        sqlx::query_as::<_, Activity>(&query)
            .bind(&input.name)
            .bind(slug)
            .bind(&input.location)
            .bind(&input.category)
            .bind(&input.description)
            .bind(&input.content)
            .bind(&input.image)
            .bind(&input.alt_text)
            .bind(&input.link)
            .bind(input.published)
            .bind(ContentKind::Activity.published_by_default())
            .bind(input.show_on_homepage)
            .bind(ranking)
            .bind(created_by)
            .fetch_one(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateActivity,
        slug: Option<&str>,
    ) -> Result<Option<Activity>, sqlx::Error> {
        let query = format!(
            "UPDATE activities SET
                name = COALESCE($2, name),
                slug = COALESCE($3, slug),
                location = COALESCE($4, location),
                category = COALESCE($5, category),
                description = COALESCE($6, description),
                content = COALESCE($7, content),
                image = COALESCE($8, image),
                alt_text = COALESCE($9, alt_text),
                link = COALESCE($10, link),
                published = COALESCE($11, published),
                show_on_homepage = COALESCE($12, show_on_homepage)
             WHERE id = $1 AND is_deleted = false
             RETURNING {}",
            Activity::COLUMNS
        );
        sqlx::query_as::<_, Activity>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(slug)
            .bind(&input.location)
            .bind(&input.category)
            .bind(&input.description)
            .bind(&input.content)
            .bind(&input.image)
            .bind(&input.alt_text)
            .bind(&input.link)
            .bind(input.published)
            .bind(input.show_on_homepage)
            .fetch_optional(pool)
            .await
    }
}
