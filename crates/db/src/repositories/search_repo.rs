//! Substring search across the content tables.

use ontdek_core::search::{like_pattern, SearchTarget};
use sqlx::PgPool;

use crate::models::search::{SearchFilters, SearchHit};

/// Provides `ILIKE` search over the content tables.
pub struct SearchRepo;

impl SearchRepo {
    /// Search one table. Deleted rows and unpublished ranked rows are never
    /// returned.
    pub async fn search(
        pool: &PgPool,
        target: SearchTarget,
        query: &str,
        filters: &SearchFilters,
    ) -> Result<Vec<SearchHit>, sqlx::Error> {
        let sql = target_query(target);
        let mut q = sqlx::query_as::<_, SearchHit>(&sql)
            .bind(target.tag())
            .bind(like_pattern(query));
        match target {
            SearchTarget::Destination => q = q.bind(&filters.location),
            SearchTarget::Activity | SearchTarget::Highlight => {
                q = q.bind(&filters.location).bind(&filters.category);
            }
            _ => {}
        }
        q.fetch_all(pool).await
    }

    /// Search each target in order and concatenate the hits.
    pub async fn search_all(
        pool: &PgPool,
        targets: &[SearchTarget],
        query: &str,
        filters: &SearchFilters,
    ) -> Result<Vec<SearchHit>, sqlx::Error> {
        let mut results = Vec::new();
        for &target in targets {
            let hits = Self::search(pool, target, query, filters).await?;
            tracing::debug!(target = target.tag(), count = hits.len(), "Search target matched");
            results.extend(hits);
        }
        Ok(results)
    }
}

/// SQL for one target. `$1` is the type tag, `$2` the `ILIKE` pattern and,
/// for filterable tables, `$3`/`$4` the location and category.
///
/// A destination is itself a location, so `$3` matches its name and the
/// category filter does not apply.
fn target_query(target: SearchTarget) -> String {
    const LIVE: &str = "is_deleted = false AND published = true";
    const FILTERS: &str = "AND ($3::TEXT IS NULL OR lower(location) = lower($3)) \
                           AND ($4::TEXT IS NULL OR lower(category) = lower($4))";

    match target {
        SearchTarget::Destination => format!(
            "SELECT $1::TEXT AS type, id, name AS title, slug, description, image
             FROM destinations
             WHERE {LIVE} AND name ILIKE $2 ESCAPE '\\'
               AND ($3::TEXT IS NULL OR lower(name) = lower($3))
             ORDER BY ranking, created_at"
        ),
        SearchTarget::Activity => format!(
            "SELECT $1::TEXT AS type, id, name AS title, slug, description, image
             FROM activities
             WHERE {LIVE} AND name ILIKE $2 ESCAPE '\\' {FILTERS}
             ORDER BY ranking, created_at"
        ),
        SearchTarget::Guide => format!(
            "SELECT $1::TEXT AS type, id, title, slug, description, image
             FROM guides
             WHERE {LIVE} AND title ILIKE $2 ESCAPE '\\'
             ORDER BY ranking, created_at"
        ),
        SearchTarget::Highlight => format!(
            "SELECT $1::TEXT AS type, id, name AS title, slug, description, icon AS image
             FROM highlights
             WHERE {LIVE} AND name ILIKE $2 ESCAPE '\\' {FILTERS}
             ORDER BY ranking, created_at"
        ),
        SearchTarget::Page => format!(
            "SELECT $1::TEXT AS type, id, title, slug, meta_description AS description,
                    header_image AS image
             FROM pages
             WHERE {LIVE} AND (title ILIKE $2 ESCAPE '\\' OR content ILIKE $2 ESCAPE '\\')
             ORDER BY ranking, created_at"
        ),
        SearchTarget::Template => "SELECT $1::TEXT AS type, id, name AS title, NULL::TEXT AS slug,
                    description, NULL::TEXT AS image
             FROM templates
             WHERE name ILIKE $2 ESCAPE '\\' OR content ILIKE $2 ESCAPE '\\'
             ORDER BY name"
            .to_string(),
    }
}
