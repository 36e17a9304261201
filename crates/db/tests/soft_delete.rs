//! Integration tests for soft-delete, restore, and hard-delete behaviour.
//!
//! Exercises the repository layer against a real database to verify that:
//! - Soft-deleted rows leave every public and admin read shape for the trash
//! - Restoring reverses this at the stored ranking
//! - Hard delete is final, including for trashed rows
//! - The slug of a trashed row is free for reuse by live rows
//! - The deleted pair is kept consistent by the CHECK constraint

use ontdek_core::content::ContentKind;
use ontdek_db::models::guide::{CreateGuide, Guide};
use ontdek_db::models::page::{CreatePage, Page};
use ontdek_db::repositories::{GuideRepo, PageRepo, RankedRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_guide(title: &str) -> CreateGuide {
    CreateGuide {
        title: title.to_string(),
        slug: None,
        description: Some("soft delete test".to_string()),
        content: None,
        image: Some("/images/guides/warschau.jpg".to_string()),
        alt_text: None,
        published: None,
        show_on_homepage: None,
        ranking: None,
    }
}

async fn create_guide(pool: &PgPool, title: &str, slug: &str, ranking: i32) -> Guide {
    GuideRepo::create(pool, &new_guide(title), slug, ranking, None)
        .await
        .unwrap()
}

fn ids(rows: &[Guide]) -> Vec<i64> {
    rows.iter().map(|g| g.id).collect()
}

// ---------------------------------------------------------------------------
// Test: visibility across read shapes
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_soft_delete_moves_row_to_trash(pool: PgPool) {
    let guide = create_guide(&pool, "Warschau in een weekend", "warschau", 0).await;

    assert!(ids(&RankedRepo::list_homepage::<Guide>(&pool).await.unwrap()).contains(&guide.id));

    let deleted = RankedRepo::soft_delete(&pool, ContentKind::Guide, guide.id)
        .await
        .unwrap();
    assert!(deleted, "soft_delete should return true on first call");

    assert!(!ids(&RankedRepo::list_admin::<Guide>(&pool).await.unwrap()).contains(&guide.id));
    assert!(!ids(&RankedRepo::list_published::<Guide>(&pool).await.unwrap()).contains(&guide.id));
    assert!(!ids(&RankedRepo::list_homepage::<Guide>(&pool).await.unwrap()).contains(&guide.id));
    assert!(ids(&RankedRepo::list_trash::<Guide>(&pool).await.unwrap()).contains(&guide.id));
    assert!(RankedRepo::find_by_id::<Guide>(&pool, guide.id)
        .await
        .unwrap()
        .is_none());

    let trashed = RankedRepo::find_by_id_include_deleted::<Guide>(&pool, guide.id)
        .await
        .unwrap()
        .unwrap();
    assert!(trashed.is_deleted);
    assert!(trashed.deleted_at.is_some());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_soft_delete_twice_returns_false(pool: PgPool) {
    let guide = create_guide(&pool, "Gdańsk", "gda-sk", 0).await;
    assert!(RankedRepo::soft_delete(&pool, ContentKind::Guide, guide.id).await.unwrap());
    assert!(!RankedRepo::soft_delete(&pool, ContentKind::Guide, guide.id).await.unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_restore_reverses_soft_delete(pool: PgPool) {
    let guide = create_guide(&pool, "Zakopane", "zakopane", 3).await;
    RankedRepo::soft_delete(&pool, ContentKind::Guide, guide.id)
        .await
        .unwrap();

    let restored = RankedRepo::restore(&pool, ContentKind::Guide, guide.id)
        .await
        .unwrap();
    assert!(restored);

    let row = RankedRepo::find_by_id::<Guide>(&pool, guide.id)
        .await
        .unwrap()
        .expect("restored guide is live again");
    assert!(!row.is_deleted);
    assert!(row.deleted_at.is_none());
    assert_eq!(row.ranking, 3, "restore keeps the stored ranking");
    assert!(ids(&RankedRepo::list_published::<Guide>(&pool).await.unwrap()).contains(&guide.id));
    assert!(!ids(&RankedRepo::list_trash::<Guide>(&pool).await.unwrap()).contains(&guide.id));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_restore_of_live_row_returns_false(pool: PgPool) {
    let guide = create_guide(&pool, "Lublin", "lublin", 0).await;
    assert!(!RankedRepo::restore(&pool, ContentKind::Guide, guide.id).await.unwrap());
}

// ---------------------------------------------------------------------------
// Test: hard delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_hard_delete_is_final(pool: PgPool) {
    let guide = create_guide(&pool, "Poznań", "pozna", 0).await;
    RankedRepo::soft_delete(&pool, ContentKind::Guide, guide.id)
        .await
        .unwrap();

    let removed = RankedRepo::hard_delete(&pool, ContentKind::Guide, guide.id)
        .await
        .unwrap()
        .expect("row existed");
    assert_eq!(removed.image.as_deref(), Some("/images/guides/warschau.jpg"));

    assert!(RankedRepo::find_state(&pool, ContentKind::Guide, guide.id)
        .await
        .unwrap()
        .is_none());
    assert!(!ids(&RankedRepo::list_trash::<Guide>(&pool).await.unwrap()).contains(&guide.id));
    assert!(!RankedRepo::restore(&pool, ContentKind::Guide, guide.id).await.unwrap());
    assert!(RankedRepo::hard_delete(&pool, ContentKind::Guide, guide.id)
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_hard_delete_returns_page_header_image(pool: PgPool) {
    let input = CreatePage {
        title: "Over ons".to_string(),
        slug: None,
        content: Some("<p>Hallo</p>".to_string()),
        meta_description: None,
        meta_keywords: None,
        template: None,
        header_image: Some("/images/headers/over-ons.jpg".to_string()),
        published: None,
        show_on_homepage: None,
        ranking: None,
    };
    let page = PageRepo::create(&pool, &input, "over-ons", 0, None).await.unwrap();
    assert!(!page.published, "pages start unpublished");

    let removed = RankedRepo::hard_delete(&pool, ContentKind::Page, page.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(removed.image.as_deref(), Some("/images/headers/over-ons.jpg"));
    assert!(RankedRepo::find_by_id_include_deleted::<Page>(&pool, page.id)
        .await
        .unwrap()
        .is_none());
}

// ---------------------------------------------------------------------------
// Test: slug scope
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_trashed_slug_can_be_reused(pool: PgPool) {
    let old = create_guide(&pool, "Kraków", "krak-w", 0).await;
    RankedRepo::soft_delete(&pool, ContentKind::Guide, old.id)
        .await
        .unwrap();

    assert!(!RankedRepo::slug_taken(&pool, ContentKind::Guide, "krak-w", None)
        .await
        .unwrap());
    let new = create_guide(&pool, "Kraków", "krak-w", 0).await;

    let matches = RankedRepo::find_by_slug::<Guide>(&pool, "krak-w").await.unwrap();
    assert_eq!(matches.len(), 2);
    assert_eq!(matches[0].id, new.id, "live row is listed first");

    // Restoring the old row would create two live rows with one slug.
    let err = RankedRepo::restore(&pool, ContentKind::Guide, old.id)
        .await
        .unwrap_err();
    let db_err = err.as_database_error().expect("database error");
    assert_eq!(db_err.constraint(), Some("uq_guides_slug_live"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_live_slug_is_rejected(pool: PgPool) {
    create_guide(&pool, "Wrocław", "wroc-aw", 0).await;
    assert!(RankedRepo::slug_taken(&pool, ContentKind::Guide, "wroc-aw", None)
        .await
        .unwrap());

    let err = GuideRepo::create(&pool, &new_guide("Wrocław"), "wroc-aw", 1, None)
        .await
        .unwrap_err();
    let db_err = err.as_database_error().expect("database error");
    assert_eq!(db_err.code().as_deref(), Some("23505"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_slug_taken_excludes_self(pool: PgPool) {
    let guide = create_guide(&pool, "Toruń", "toru", 0).await;
    assert!(!RankedRepo::slug_taken(&pool, ContentKind::Guide, "toru", Some(guide.id))
        .await
        .unwrap());
}

// ---------------------------------------------------------------------------
// Test: schema invariants
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_deleted_pair_check_constraint(pool: PgPool) {
    let guide = create_guide(&pool, "Łódź", "d", 0).await;
    let result = sqlx::query("UPDATE guides SET is_deleted = true WHERE id = $1")
        .bind(guide.id)
        .execute(&pool)
        .await;
    let err = result.unwrap_err();
    let db_err = err.as_database_error().expect("database error");
    assert_eq!(db_err.constraint(), Some("ck_guides_deleted_pair"));
}
