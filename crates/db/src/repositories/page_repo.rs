//! Repository for the `pages` table.

use ontdek_core::content::ContentKind;
use ontdek_core::types::DbId;
use sqlx::PgPool;

use crate::models::page::{CreatePage, Page, UpdatePage};
use crate::repositories::ranked_repo::RankedEntity;

pub struct PageRepo;

impl PageRepo {
    /// Insert a new page at `ranking`. Pages default to unpublished.
    pub async fn create(
        pool: &PgPool,
        input: &CreatePage,
        slug: &str,
        ranking: i32,
        created_by: Option<DbId>,
    ) -> Result<Page, sqlx::Error> {
        let query = format!(
            "INSERT INTO pages
                (title, slug, content, meta_description, meta_keywords, template, header_image,
                 published, show_on_homepage, ranking, created_by)
             VALUES ($1, $2, $3, $4, $5, $6, $7, COALESCE($8, $9), COALESCE($10, true), $11, $12)
             RETURNING {}",
            Page::COLUMNS
        );
        sqlx::query_as::<_, Page>(&query)
            .bind(&input.title)
            .bind(slug)
            .bind(&input.content)
            .bind(&input.meta_description)
            .bind(&input.meta_keywords)
            .bind(&input.template)
            .bind(&input.header_image)
            .bind(input.published)
            .bind(ContentKind::Page.published_by_default())
            .bind(input.show_on_homepage)
            .bind(ranking)
            .bind(created_by)
            .fetch_one(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePage,
        slug: Option<&str>,
    ) -> Result<Option<Page>, sqlx::Error> {
        let query = format!(
            "UPDATE pages SET
                title = COALESCE($2, title),
                slug = COALESCE($3, slug),
                content = COALESCE($4, content),
                meta_description = COALESCE($5, meta_description),
                meta_keywords = COALESCE($6, meta_keywords),
                template = COALESCE($7, template),
                header_image = COALESCE($8, header_image),
                published = COALESCE($9, published),
                show_on_homepage = COALESCE($10, show_on_homepage)
             WHERE id = $1 AND is_deleted = false
             RETURNING {}",
            Page::COLUMNS
        );
        sqlx::query_as::<_, Page>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(slug)
            .bind(&input.content)
            .bind(&input.meta_description)
            .bind(&input.meta_keywords)
            .bind(&input.template)
            .bind(&input.header_image)
            .bind(input.published)
            .bind(input.show_on_homepage)
            .fetch_optional(pool)
            .await
    }
}
