//! HTTP-level tests for the ranked content routes.
//!
//! Covers creation defaults, the ranking shift, the soft-delete/restore
//! lifecycle, hard-delete finality, slug conflicts and permission checks.

mod common;

use axum::http::StatusCode;
use common::{
    admin_token, body_json, create_user, delete_auth, editor, get, get_auth, patch_auth,
    post_json, post_json_auth, put_json_auth,
};
use serde_json::json;
use sqlx::PgPool;

async fn create_destination(app: axum::Router, token: &str, name: &str) -> serde_json::Value {
    let response = post_json_auth(app, "/api/destinations", json!({ "name": name }), token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

fn names(list: &serde_json::Value) -> Vec<&str> {
    list.as_array()
        .unwrap()
        .iter()
        .map(|d| d["name"].as_str().unwrap())
        .collect()
}

// ---------------------------------------------------------------------------
// Create and rank
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_derives_slug_and_appends_ranking(pool: PgPool) {
    let (_user, token) = create_user(&pool, "redacteur", editor()).await;
    let app = common::build_test_app(pool);

    let krakow = create_destination(app.clone(), &token, "Kraków").await;
    let gdansk = create_destination(app.clone(), &token, "Gdańsk").await;

    assert_eq!(krakow["slug"], "krak-w");
    assert_eq!(krakow["ranking"], 0);
    assert_eq!(gdansk["slug"], "gda-sk");
    assert_eq!(gdansk["ranking"], 1);
    assert_eq!(krakow["published"], true);

    let by_slug = body_json(get(app, "/api/destinations/krak-w").await).await;
    assert_eq!(by_slug["id"], krakow["id"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_ranking_move_reorders_published_list(pool: PgPool) {
    let (_user, token) = create_user(&pool, "redacteur", editor()).await;
    let app = common::build_test_app(pool);

    create_destination(app.clone(), &token, "Kraków").await;
    let gdansk = create_destination(app.clone(), &token, "Gdańsk").await;

    let uri = format!("/api/destinations/{}/ranking", gdansk["id"]);
    let response = patch_auth(app.clone(), &uri, Some(json!({ "ranking": 0 })), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let change = body_json(response).await;
    assert_eq!(change["old_ranking"], 1);
    assert_eq!(change["new_ranking"], 0);
    assert_eq!(change["shifted"], 1);

    let list = body_json(get(app, "/api/destinations").await).await;
    assert_eq!(names(&list), vec!["Gdańsk", "Kraków"]);
    assert_eq!(list[1]["ranking"], 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_negative_ranking_is_rejected(pool: PgPool) {
    let (_user, token) = create_user(&pool, "redacteur", editor()).await;
    let app = common::build_test_app(pool);
    let krakow = create_destination(app.clone(), &token, "Kraków").await;

    let uri = format!("/api/destinations/{}/ranking", krakow["id"]);
    let response = patch_auth(app, &uri, Some(json!({ "ranking": -1 })), &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_with_new_name_regenerates_slug(pool: PgPool) {
    let (_user, token) = create_user(&pool, "redacteur", editor()).await;
    let app = common::build_test_app(pool);
    let row = create_destination(app.clone(), &token, "Wroclaw").await;

    let uri = format!("/api/destinations/{}", row["id"]);
    let response = put_json_auth(app.clone(), &uri, json!({ "name": "Wrocław Oude Stad" }), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert_eq!(updated["slug"], "wroc-aw-oude-stad");

    assert_eq!(get(app, "/api/destinations/wroclaw").await.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Visibility
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unpublished_slug_is_not_public(pool: PgPool) {
    let (_user, token) = create_user(&pool, "redacteur", editor()).await;
    let app = common::build_test_app(pool);

    let response = post_json_auth(
        app.clone(),
        "/api/destinations",
        json!({ "name": "Zakopane", "published": false }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    assert_eq!(get(app.clone(), "/api/destinations/zakopane").await.status(), StatusCode::NOT_FOUND);
    let published = body_json(get(app.clone(), "/api/destinations").await).await;
    assert!(published.as_array().unwrap().is_empty());

    let admin_list = body_json(get_auth(app, "/api/admin/destinations", &token).await).await;
    assert_eq!(names(&admin_list), vec!["Zakopane"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_soft_delete_and_restore_round_trip(pool: PgPool) {
    let token = admin_token(&pool).await;
    let app = common::build_test_app(pool);
    let row = create_destination(app.clone(), &token, "Kraków").await;
    let id = row["id"].as_i64().unwrap();

    let response = patch_auth(app.clone(), &format!("/api/destinations/{id}/soft-delete"), None, &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    assert_eq!(get(app.clone(), "/api/destinations/krak-w").await.status(), StatusCode::NOT_FOUND);
    let trash = body_json(get_auth(app.clone(), "/api/admin/destinations/trash", &token).await).await;
    assert_eq!(names(&trash), vec!["Kraków"]);
    assert_eq!(trash[0]["is_deleted"], true);
    assert!(trash[0]["deleted_at"].is_string());

    let response = patch_auth(app.clone(), &format!("/api/destinations/{id}/restore"), None, &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let restored = body_json(response).await;
    assert_eq!(restored["is_deleted"], false);
    assert!(restored["deleted_at"].is_null());
    assert_eq!(restored["ranking"], 0);

    assert_eq!(get(app, "/api/destinations/krak-w").await.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_restore_of_live_row_conflicts(pool: PgPool) {
    let token = admin_token(&pool).await;
    let app = common::build_test_app(pool);
    let row = create_destination(app.clone(), &token, "Kraków").await;

    let uri = format!("/api/destinations/{}/restore", row["id"]);
    let response = patch_auth(app, &uri, None, &token).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_hard_delete_is_final(pool: PgPool) {
    let token = admin_token(&pool).await;
    let app = common::build_test_app(pool);
    let row = create_destination(app.clone(), &token, "Kraków").await;
    let id = row["id"].as_i64().unwrap();

    patch_auth(app.clone(), &format!("/api/destinations/{id}/soft-delete"), None, &token).await;
    let response = delete_auth(app.clone(), &format!("/api/destinations/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = patch_auth(app.clone(), &format!("/api/destinations/{id}/restore"), None, &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let trash = body_json(get_auth(app, "/api/admin/destinations/trash", &token).await).await;
    assert!(trash.as_array().unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Slugs
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_slug_conflicts_until_trashed(pool: PgPool) {
    let token = admin_token(&pool).await;
    let app = common::build_test_app(pool);
    let first = create_destination(app.clone(), &token, "Kraków").await;

    let response = post_json_auth(app.clone(), "/api/destinations", json!({ "name": "Kraków" }), &token).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("krak-w"));

    let uri = format!("/api/destinations/{}/soft-delete", first["id"]);
    patch_auth(app.clone(), &uri, None, &token).await;
    create_destination(app.clone(), &token, "Kraków").await;

    // The trashed original can no longer come back under the same slug.
    let uri = format!("/api/destinations/{}/restore", first["id"]);
    let response = patch_auth(app, &uri, None, &token).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_malformed_explicit_slug_is_rejected(pool: PgPool) {
    let token = admin_token(&pool).await;
    let app = common::build_test_app(pool);

    let response = post_json_auth(
        app,
        "/api/guides",
        json!({ "title": "Warschau", "slug": "Warschau Centrum" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_route_name_slug_is_reserved(pool: PgPool) {
    let token = admin_token(&pool).await;
    let app = common::build_test_app(pool);

    let response = post_json_auth(app.clone(), "/api/pages", json!({ "title": "Homepage" }), &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(response).await["error"].as_str().unwrap().contains("homepage"));

    let dest = create_destination(app.clone(), &token, "Lublin").await;
    let uri = format!("/api/destinations/{}", dest["id"]);
    let response = put_json_auth(app.clone(), &uri, json!({ "slug": "homepage" }), &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_json_auth(
        app.clone(),
        "/api/pages",
        json!({ "title": "Homepage", "slug": "welkom", "published": true }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(get(app, "/api/pages/welkom").await.status(), StatusCode::OK);
}

// ---------------------------------------------------------------------------
// Permissions
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_writes_require_a_token(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(app, "/api/destinations", json!({ "name": "Kraków" })).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_requires_delete_permission(pool: PgPool) {
    let (_user, token) = create_user(&pool, "redacteur", editor()).await;
    let app = common::build_test_app(pool);
    let row = create_destination(app.clone(), &token, "Kraków").await;
    let id = row["id"].as_i64().unwrap();

    let response = patch_auth(app.clone(), &format!("/api/destinations/{id}/soft-delete"), None, &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let response = delete_auth(app, &format!("/api/destinations/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_validation_errors_list_fields(pool: PgPool) {
    let token = admin_token(&pool).await;
    let app = common::build_test_app(pool);

    let response = post_json_auth(app, "/api/activities", json!({ "name": "" }), &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Validatie mislukt");
    assert_eq!(json["details"][0]["field"], "name");
}
