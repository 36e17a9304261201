//! Generic operations shared by every ranked, soft-deletable table.
//!
//! The five content tables (`destinations`, `guides`, `pages`,
//! `activities`, `highlights`) share the same bookkeeping columns:
//! `slug`, `published`, `show_on_homepage`, `ranking`, `is_deleted`,
//! `deleted_at`. Everything that only touches those columns lives here.
//! Inserts and field updates stay in the per-table repositories.
//!
//! Operations that only need to know the table take a [`ContentKind`];
//! typed reads are generic over [`RankedEntity`].

use ontdek_core::content::ContentKind;
use ontdek_core::error::CoreError;
use ontdek_core::ranking::{plan_shift, resolve_target, RankBounds};
use ontdek_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool};

/// A row type stored in one of the ranked content tables.
pub trait RankedEntity: for<'r> FromRow<'r, PgRow> + Serialize + Send + Unpin + 'static {
    const KIND: ContentKind;
    /// Column list shared across queries to avoid repetition.
    const COLUMNS: &'static str;

    fn id(&self) -> DbId;
    fn title(&self) -> &str;
    fn slug(&self) -> &str;
    /// Live and published.
    fn is_publicly_visible(&self) -> bool;
}

/// Table-agnostic projection of the bookkeeping columns.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RowState {
    pub id: DbId,
    pub slug: String,
    pub ranking: i32,
    pub is_deleted: bool,
    pub deleted_at: Option<Timestamp>,
    /// Stored image path, when the table has an image column.
    pub image: Option<String>,
}

/// Outcome of a successful [`RankedRepo::set_ranking`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankingChange {
    pub id: DbId,
    pub old_ranking: i32,
    pub new_ranking: i32,
    /// Number of sibling rows whose ranking moved.
    pub shifted: u64,
}

/// Errors from [`RankedRepo::set_ranking`].
#[derive(Debug, thiserror::Error)]
pub enum RankingError {
    #[error(transparent)]
    Invalid(#[from] CoreError),
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Ranking, soft-delete and read shapes for the ranked tables.
pub struct RankedRepo;

impl RankedRepo {
    // -----------------------------------------------------------------------
    // Ranking
    // -----------------------------------------------------------------------

    /// Move a live row to `requested`, shifting the siblings in between.
    ///
    /// Moving up increments every other live row in `[new, old)`; moving
    /// down decrements every other live row in `(old, new]`. The shift and
    /// the target update commit together. No row lock is taken, so two
    /// concurrent calls on the same table can still interleave.
    ///
    /// Returns `Ok(None)` if no live row with `id` exists.
    pub async fn set_ranking(
        pool: &PgPool,
        kind: ContentKind,
        id: DbId,
        requested: i32,
        bounds: RankBounds,
    ) -> Result<Option<RankingChange>, RankingError> {
        let table = kind.table();
        let mut tx = pool.begin().await?;

        let current: Option<(i32,)> = sqlx::query_as(&format!(
            "SELECT ranking FROM {table} WHERE id = $1 AND is_deleted = false"
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;
        let Some((old_ranking,)) = current else {
            return Ok(None);
        };

        let (live_count,): (i64,) = sqlx::query_as(&format!(
            "SELECT COUNT(*) FROM {table} WHERE is_deleted = false"
        ))
        .fetch_one(&mut *tx)
        .await?;
        let new_ranking = resolve_target(requested, live_count, bounds)?;

        let Some(shift) = plan_shift(old_ranking, new_ranking) else {
            tx.commit().await?;
            return Ok(Some(RankingChange {
                id,
                old_ranking,
                new_ranking,
                shifted: 0,
            }));
        };

        // updated_at is refreshed on shifted rows by the table trigger.
        let shifted = sqlx::query(&format!(
            "UPDATE {table} SET ranking = ranking + $1
             WHERE is_deleted = false AND id <> $2 AND ranking BETWEEN $3 AND $4"
        ))
        .bind(shift.delta)
        .bind(id)
        .bind(shift.from)
        .bind(shift.to)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        sqlx::query(&format!("UPDATE {table} SET ranking = $2 WHERE id = $1"))
            .bind(id)
            .bind(new_ranking)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::debug!(%kind, id, old_ranking, new_ranking, shifted, "Ranking updated");
        Ok(Some(RankingChange {
            id,
            old_ranking,
            new_ranking,
            shifted,
        }))
    }

    /// Number of live rows, used to place new rows at the end.
    pub async fn live_count(pool: &PgPool, kind: ContentKind) -> Result<i64, sqlx::Error> {
        let table = kind.table();
        let (count,): (i64,) =
            sqlx::query_as(&format!("SELECT COUNT(*) FROM {table} WHERE is_deleted = false"))
                .fetch_one(pool)
                .await?;
        Ok(count)
    }

    // -----------------------------------------------------------------------
    // Soft delete / restore / hard delete
    // -----------------------------------------------------------------------

    /// Soft-delete a row. Returns `true` if a live row was marked deleted.
    ///
    /// Remaining rankings are left as they are.
    pub async fn soft_delete(
        pool: &PgPool,
        kind: ContentKind,
        id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let table = kind.table();
        let result = sqlx::query(&format!(
            "UPDATE {table} SET is_deleted = true, deleted_at = NOW()
             WHERE id = $1 AND is_deleted = false"
        ))
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Restore a soft-deleted row at its stored ranking. Returns `true` if a
    /// row was restored.
    ///
    /// Fails with a unique violation on `uq_<table>_slug_live` if a live row
    /// has taken the slug in the meantime.
    pub async fn restore(pool: &PgPool, kind: ContentKind, id: DbId) -> Result<bool, sqlx::Error> {
        let table = kind.table();
        let result = sqlx::query(&format!(
            "UPDATE {table} SET is_deleted = false, deleted_at = NULL
             WHERE id = $1 AND is_deleted = true"
        ))
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Permanently delete a row, live or trashed.
    ///
    /// Returns the removed row's state so the caller can clean up its image.
    pub async fn hard_delete(
        pool: &PgPool,
        kind: ContentKind,
        id: DbId,
    ) -> Result<Option<RowState>, sqlx::Error> {
        let query = format!(
            "DELETE FROM {table} WHERE id = $1 RETURNING {columns}",
            table = kind.table(),
            columns = state_columns(kind),
        );
        sqlx::query_as::<_, RowState>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Bookkeeping columns of any row, deleted or not.
    pub async fn find_state(
        pool: &PgPool,
        kind: ContentKind,
        id: DbId,
    ) -> Result<Option<RowState>, sqlx::Error> {
        let query = format!(
            "SELECT {columns} FROM {table} WHERE id = $1",
            table = kind.table(),
            columns = state_columns(kind),
        );
        sqlx::query_as::<_, RowState>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Whether a live row other than `exclude_id` already uses `slug`.
    pub async fn slug_taken(
        pool: &PgPool,
        kind: ContentKind,
        slug: &str,
        exclude_id: Option<DbId>,
    ) -> Result<bool, sqlx::Error> {
        let table = kind.table();
        let (taken,): (bool,) = sqlx::query_as(&format!(
            "SELECT EXISTS(
                SELECT 1 FROM {table}
                WHERE slug = $1 AND is_deleted = false AND ($2::BIGINT IS NULL OR id <> $2)
             )"
        ))
        .bind(slug)
        .bind(exclude_id)
        .fetch_one(pool)
        .await?;
        Ok(taken)
    }

    // -----------------------------------------------------------------------
    // Typed lookups
    // -----------------------------------------------------------------------

    /// Find a live row by ID.
    pub async fn find_by_id<T: RankedEntity>(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<T>, sqlx::Error> {
        let query = format!(
            "SELECT {} FROM {} WHERE id = $1 AND is_deleted = false",
            T::COLUMNS,
            T::KIND.table()
        );
        sqlx::query_as::<_, T>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a row by ID, including soft-deleted rows.
    pub async fn find_by_id_include_deleted<T: RankedEntity>(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<T>, sqlx::Error> {
        let query = format!("SELECT {} FROM {} WHERE id = $1", T::COLUMNS, T::KIND.table());
        sqlx::query_as::<_, T>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find rows by slug regardless of deletion or publication state.
    ///
    /// A trashed row may share its slug with a live one, so this returns
    /// every match, live rows first. Callers decide what is visible.
    pub async fn find_by_slug<T: RankedEntity>(
        pool: &PgPool,
        slug: &str,
    ) -> Result<Vec<T>, sqlx::Error> {
        let query = format!(
            "SELECT {} FROM {} WHERE slug = $1 ORDER BY is_deleted ASC, id DESC",
            T::COLUMNS,
            T::KIND.table()
        );
        sqlx::query_as::<_, T>(&query).bind(slug).fetch_all(pool).await
    }

    // -----------------------------------------------------------------------
    // Read shapes
    // -----------------------------------------------------------------------

    /// All live rows, published or not. Used by the editor.
    pub async fn list_admin<T: RankedEntity>(pool: &PgPool) -> Result<Vec<T>, sqlx::Error> {
        Self::list_where::<T>(pool, "is_deleted = false", "ranking ASC, created_at ASC").await
    }

    /// Live, published rows.
    pub async fn list_published<T: RankedEntity>(pool: &PgPool) -> Result<Vec<T>, sqlx::Error> {
        Self::list_where::<T>(
            pool,
            "is_deleted = false AND published = true",
            "ranking ASC, created_at ASC",
        )
        .await
    }

    /// Live, published rows flagged for the homepage.
    pub async fn list_homepage<T: RankedEntity>(pool: &PgPool) -> Result<Vec<T>, sqlx::Error> {
        Self::list_where::<T>(
            pool,
            "is_deleted = false AND published = true AND show_on_homepage = true",
            "ranking ASC, created_at ASC",
        )
        .await
    }

    /// The recycle bin, most recently deleted first.
    pub async fn list_trash<T: RankedEntity>(pool: &PgPool) -> Result<Vec<T>, sqlx::Error> {
        Self::list_where::<T>(pool, "is_deleted = true", "deleted_at DESC, id DESC").await
    }

    async fn list_where<T: RankedEntity>(
        pool: &PgPool,
        filter: &str,
        order: &str,
    ) -> Result<Vec<T>, sqlx::Error> {
        let query = format!(
            "SELECT {} FROM {} WHERE {filter} ORDER BY {order}",
            T::COLUMNS,
            T::KIND.table()
        );
        sqlx::query_as::<_, T>(&query).fetch_all(pool).await
    }
}

fn state_columns(kind: ContentKind) -> String {
    format!(
        "id, slug, ranking, is_deleted, deleted_at, {} AS image",
        kind.image_column().unwrap_or("NULL::TEXT")
    )
}
