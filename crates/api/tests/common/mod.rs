#![allow(dead_code)]

use std::path::PathBuf;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use ontdek_api::auth::jwt::{generate_access_token, JwtConfig};
use ontdek_api::auth::password::hash_password;
use ontdek_api::config::{ServerConfig, DEFAULT_MAX_UPLOAD_BYTES};
use ontdek_api::router::build_app_router;
use ontdek_api::state::AppState;
use ontdek_core::permissions::Permissions;
use ontdek_core::platform::Platform;
use ontdek_core::ranking::RankBounds;
use ontdek_db::models::user::{CreateUser, User};
use ontdek_db::repositories::UserRepo;
use sqlx::PgPool;
use tower::ServiceExt;

pub const TEST_PASSWORD: &str = "pierogi-z-serem";

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
        access_token_expiry_mins: 15,
        refresh_token_expiry_days: 7,
    }
}

/// A test `ServerConfig` rooted at `images_dir` on `platform`.
pub fn test_config(images_dir: PathBuf, platform: Platform) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        app_env: "test".to_string(),
        images_dir,
        max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        ranking_bounds: RankBounds::Free,
        platform,
        jwt: test_jwt_config(),
    }
}

/// The production router over `pool`, with images in a shared temp folder.
pub fn build_test_app(pool: PgPool) -> Router {
    let images = std::env::temp_dir().join("ontdek-api-tests");
    build_app(pool, test_config(images, Platform::Local))
}

pub fn build_app(pool: PgPool, config: ServerConfig) -> Router {
    let state = AppState::new(pool, config.clone());
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

/// Insert a user with [`TEST_PASSWORD`] and return it with a valid token.
pub async fn create_user(pool: &PgPool, username: &str, permissions: Permissions) -> (User, String) {
    let user = UserRepo::create(
        pool,
        &CreateUser {
            username: username.to_string(),
            email: format!("{username}@ontdekpolen.test"),
            password_hash: hash_password(TEST_PASSWORD).unwrap(),
            permissions,
        },
    )
    .await
    .unwrap();
    let token =
        generate_access_token(user.id, &user.username, permissions, &test_jwt_config()).unwrap();
    (user, token)
}

pub async fn admin_token(pool: &PgPool) -> String {
    create_user(pool, "beheerder", Permissions::admin()).await.1
}

pub fn editor() -> Permissions {
    Permissions {
        can_create_content: true,
        can_edit_content: true,
        ..Default::default()
    }
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    let body = match body {
        Some(json) => {
            builder = builder.header(CONTENT_TYPE, "application/json");
            Body::from(serde_json::to_vec(&json).unwrap())
        }
        None => Body::empty(),
    };
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn put_json_auth(app: Router, uri: &str, body: serde_json::Value, token: &str) -> Response {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn patch_auth(
    app: Router,
    uri: &str,
    body: Option<serde_json::Value>,
    token: &str,
) -> Response {
    send(app, Method::PATCH, uri, Some(token), body).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// Send a multipart form with text `fields` and one `file` part.
pub async fn post_multipart_auth(
    app: Router,
    uri: &str,
    fields: &[(&str, &str)],
    file: Option<(&str, &[u8])>,
    token: &str,
) -> Response {
    const BOUNDARY: &str = "ontdek-test-boundary";
    let mut body: Vec<u8> = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some((file_name, data)) = file {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; \
                 filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .header(CONTENT_TYPE, format!("multipart/form-data; boundary={BOUNDARY}"))
        .body(Body::from(body))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
