//! Repository for the `destinations` table.
//!
//! Ranking, soft delete and the read shapes live in [`RankedRepo`]; this
//! repository only owns the insert and the field update.
//!
//! [`RankedRepo`]: crate::repositories::RankedRepo

use ontdek_core::content::ContentKind;
use ontdek_core::types::DbId;
use sqlx::PgPool;

use crate::models::destination::{CreateDestination, Destination, UpdateDestination};
use crate::repositories::ranked_repo::RankedEntity;

pub struct DestinationRepo;

impl DestinationRepo {
    /// Insert a new destination at `ranking`, returning the created row.
    ///
    /// `slug` has already been derived and checked for live conflicts.
    pub async fn create(
        pool: &PgPool,
        input: &CreateDestination,
        slug: &str,
        ranking: i32,
        created_by: Option<DbId>,
    ) -> Result<Destination, sqlx::Error> {
        let query = format!(
            "INSERT INTO destinations
                (name, slug, description, content, image, alt_text, link,
                 published, show_on_homepage, ranking, created_by)
             VALUES ($1, $2, $3, $4, $5, $6, $7, COALESCE($8, $9), COALESCE($10, true), $11, $12)
             RETURNING {}",
            Destination::COLUMNS
        );
        sqlx::query_as::<_, Destination>(&query)
            .bind(&input.name)
            .bind(slug)
            .bind(&input.description)
            .bind(&input.content)
            .bind(&input.image)
            .bind(&input.alt_text)
            .bind(&input.link)
            .bind(input.published)
            .bind(ContentKind::Destination.published_by_default())
            .bind(input.show_on_homepage)
            .bind(ranking)
            .bind(created_by)
            .fetch_one(pool)
            .await
    }

    /// Update a live destination. Only non-`None` fields in `input` are
    /// applied; `ranking` is ignored here and goes through `set_ranking`.
    ///
    /// Returns `None` if no live row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateDestination,
        slug: Option<&str>,
    ) -> Result<Option<Destination>, sqlx::Error> {
        let query = format!(
            "UPDATE destinations SET
                name = COALESCE($2, name),
                slug = COALESCE($3, slug),
                description = COALESCE($4, description),
                content = COALESCE($5, content),
                image = COALESCE($6, image),
                alt_text = COALESCE($7, alt_text),
                link = COALESCE($8, link),
                published = COALESCE($9, published),
                show_on_homepage = COALESCE($10, show_on_homepage)
             WHERE id = $1 AND is_deleted = false
             RETURNING {}",
            Destination::COLUMNS
        );
        sqlx::query_as::<_, Destination>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(slug)
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
