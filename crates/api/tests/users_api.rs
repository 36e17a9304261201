//! HTTP-level tests for `/api/admin/users`.

mod common;

use axum::http::StatusCode;
use common::{admin_token, body_json, create_user, delete_auth, editor, get_auth, post_json_auth, put_json_auth};
use ontdek_core::permissions::Permissions;
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_admin_creates_user_with_default_flags(pool: PgPool) {
    let token = admin_token(&pool).await;
    let app = common::build_test_app(pool);

    let response = post_json_auth(
        app.clone(),
        "/api/admin/users",
        json!({ "username": "gids", "email": "gids@ontdekpolen.test", "password": "bigos-en-barszcz" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let user = body_json(response).await;
    assert_eq!(user["can_create_content"], true);
    assert_eq!(user["can_edit_content"], true);
    assert_eq!(user["can_delete_content"], false);
    assert_eq!(user["is_admin"], false);

    let list = body_json(get_auth(app, "/api/admin/users", &token).await).await;
    assert_eq!(list.as_array().unwrap().len(), 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_username_conflicts(pool: PgPool) {
    let token = admin_token(&pool).await;
    let app = common::build_test_app(pool);

    let response = post_json_auth(
        app,
        "/api/admin/users",
        json!({ "username": "beheerder", "email": "ander@ontdekpolen.test", "password": "bigos-en-barszcz" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_user_managers_cannot_grant_admin(pool: PgPool) {
    let manager = Permissions {
        can_manage_users: true,
        ..Default::default()
    };
    let (_user, token) = create_user(&pool, "personeel", manager).await;
    let (target, _) = create_user(&pool, "redacteur", editor()).await;
    let app = common::build_test_app(pool);

    let uri = format!("/api/admin/users/{}", target.id);
    let response = put_json_auth(app.clone(), &uri, json!({ "is_admin": true }), &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = put_json_auth(app, &uri, json!({ "can_delete_content": true }), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["can_delete_content"], true);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_editors_cannot_manage_users(pool: PgPool) {
    let (_user, token) = create_user(&pool, "redacteur", editor()).await;
    let app = common::build_test_app(pool);

    let response = get_auth(app, "/api/admin/users", &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_cannot_delete_own_account(pool: PgPool) {
    let (admin, token) = create_user(&pool, "beheerder", Permissions::admin()).await;
    let (other, _) = create_user(&pool, "redacteur", editor()).await;
    let app = common::build_test_app(pool);

    let response = delete_auth(app.clone(), &format!("/api/admin/users/{}", admin.id), &token).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = delete_auth(app.clone(), &format!("/api/admin/users/{}", other.id), &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let response = get_auth(app, &format!("/api/admin/users/{}", other.id), &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
