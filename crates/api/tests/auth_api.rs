//! HTTP-level tests for login, refresh, logout, status and password changes.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, create_user, editor, get, get_auth, post_json, post_json_auth, TEST_PASSWORD,
};
use ontdek_core::permissions::Permissions;
use serde_json::json;
use sqlx::PgPool;

async fn login(app: axum::Router, username: &str, password: &str) -> serde_json::Value {
    let body = json!({ "username": username, "password": password });
    let response = post_json(app, "/api/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_login_returns_tokens_and_flags(pool: PgPool) {
    let (user, _token) = create_user(&pool, "redacteur", editor()).await;
    let app = common::build_test_app(pool);

    let json = login(app, "redacteur", TEST_PASSWORD).await;

    assert!(json["access_token"].is_string());
    assert!(json["refresh_token"].is_string());
    assert_eq!(json["expires_in"], 15 * 60);
    assert_eq!(json["user"]["id"], user.id);
    assert_eq!(json["user"]["can_edit_content"], true);
    assert_eq!(json["user"]["can_delete_content"], false);
    assert!(json["user"].get("password_hash").is_none());
    assert!(json["user"]["last_login_at"].is_string());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_wrong_password_and_unknown_user_are_401(pool: PgPool) {
    create_user(&pool, "redacteur", editor()).await;
    let app = common::build_test_app(pool);

    let response = post_json(
        app.clone(),
        "/api/login",
        json!({ "username": "redacteur", "password": "verkeerd-wachtwoord" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let wrong_password = body_json(response).await;

    let response = post_json(
        app,
        "/api/login",
        json!({ "username": "niemand", "password": TEST_PASSWORD }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await, wrong_password);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_refresh_rotates_the_session(pool: PgPool) {
    create_user(&pool, "redacteur", editor()).await;
    let app = common::build_test_app(pool);
    let session = login(app.clone(), "redacteur", TEST_PASSWORD).await;
    let refresh_token = session["refresh_token"].as_str().unwrap();

    let response = post_json(
        app.clone(),
        "/api/auth/refresh",
        json!({ "refresh_token": refresh_token }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let rotated = body_json(response).await;
    assert_ne!(rotated["refresh_token"], session["refresh_token"]);

    // The old refresh token was revoked by the rotation.
    let response = post_json(
        app,
        "/api/auth/refresh",
        json!({ "refresh_token": refresh_token }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_logout_revokes_refresh_tokens(pool: PgPool) {
    create_user(&pool, "redacteur", editor()).await;
    let app = common::build_test_app(pool);
    let session = login(app.clone(), "redacteur", TEST_PASSWORD).await;
    let access = session["access_token"].as_str().unwrap();

    let response = post_json_auth(app.clone(), "/api/logout", json!({}), access).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["message"], "Je bent uitgelogd");

    let response = post_json(
        app,
        "/api/auth/refresh",
        json!({ "refresh_token": session["refresh_token"] }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_status_reports_without_failing(pool: PgPool) {
    let (user, token) = create_user(&pool, "redacteur", editor()).await;
    let app = common::build_test_app(pool);

    let anonymous = body_json(get(app.clone(), "/api/auth/status").await).await;
    assert_eq!(anonymous["authenticated"], false);
    assert!(anonymous["user"].is_null());

    let stale = body_json(get_auth(app.clone(), "/api/auth/status", "not-a-jwt").await).await;
    assert_eq!(stale["authenticated"], false);

    let json = body_json(get_auth(app, "/api/auth/status", &token).await).await;
    assert_eq!(json["authenticated"], true);
    assert_eq!(json["user"]["username"], user.username);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_change_password(pool: PgPool) {
    let (_user, token) = create_user(&pool, "redacteur", Permissions::default()).await;
    let app = common::build_test_app(pool);

    let response = post_json_auth(
        app.clone(),
        "/api/auth/change-password",
        json!({ "current_password": "fout", "new_password": "nieuw-wachtwoord" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = post_json_auth(
        app.clone(),
        "/api/auth/change-password",
        json!({ "current_password": TEST_PASSWORD, "new_password": "kort" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_json_auth(
        app.clone(),
        "/api/auth/change-password",
        json!({ "current_password": TEST_PASSWORD, "new_password": "nieuw-wachtwoord" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    login(app, "redacteur", "nieuw-wachtwoord").await;
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_malformed_authorization_header_is_401(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = common::send(
        app,
        axum::http::Method::POST,
        "/api/logout",
        None,
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["error"], "Je bent niet ingelogd");
}
