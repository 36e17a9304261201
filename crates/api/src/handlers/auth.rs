//! Handlers for login, logout, session status and password changes.

use axum::extract::State;
use axum::http::header::USER_AGENT;
use axum::http::HeaderMap;
use axum::Json;
use chrono::Utc;
use ontdek_core::error::CoreError;
use ontdek_db::models::session::CreateSession;
use ontdek_db::models::user::{User, UserResponse};
use ontdek_db::repositories::{SessionRepo, UserRepo};
use serde::{Deserialize, Serialize};

use crate::auth::jwt::{generate_access_token, generate_refresh_token, hash_refresh_token};
use crate::auth::password::{
    hash_password, validate_password_strength, verify_password, MIN_PASSWORD_LENGTH,
};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::MaybeAuthUser;
use crate::middleware::rbac::RequireAuth;
use crate::response::MessageResponse;
use crate::state::AppState;

const INVALID_CREDENTIALS: &str = "Ongeldige gebruikersnaam of wachtwoord";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /api/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Request body for `POST /api/auth/refresh`.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Request body for `POST /api/auth/change-password`.
#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

/// Successful authentication response returned by login and refresh.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserResponse,
}

/// Response body for `GET /api/auth/status`.
#[derive(Debug, Serialize)]
pub struct AuthStatus {
    pub authenticated: bool,
    pub user: Option<UserResponse>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/login
pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let mut user = UserRepo::find_by_username(&state.pool, input.username.trim())
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized(INVALID_CREDENTIALS.into())))?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        tracing::info!(username = %user.username, "Failed login attempt");
        return Err(AppError::Core(CoreError::Unauthorized(
            INVALID_CREDENTIALS.into(),
        )));
    }

    UserRepo::record_login(&state.pool, user.id).await?;
    user.last_login_at = Some(Utc::now());
    tracing::info!(user_id = user.id, "User logged in");

    let response = create_auth_response(&state, user, user_agent(&headers)).await?;
    Ok(Json(response))
}

/// POST /api/auth/refresh
///
/// Exchange a valid refresh token for a new token pair. The old session is
/// revoked.
pub async fn refresh(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(input): Json<RefreshRequest>,
) -> AppResult<Json<AuthResponse>> {
    let token_hash = hash_refresh_token(&input.refresh_token);

    let session = SessionRepo::find_by_refresh_token_hash(&state.pool, &token_hash)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Vernieuwingstoken is ongeldig of verlopen".into(),
            ))
        })?;

    SessionRepo::revoke(&state.pool, session.id).await?;

    let user = UserRepo::find_by_id(&state.pool, session.user_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Gebruiker bestaat niet meer".into()))
        })?;

    let response = create_auth_response(&state, user, user_agent(&headers)).await?;
    Ok(Json(response))
}

/// POST /api/logout
///
/// Revoke all sessions for the authenticated user.
pub async fn logout(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
) -> AppResult<Json<MessageResponse>> {
    let revoked = SessionRepo::revoke_all_for_user(&state.pool, user.user_id).await?;
    tracing::info!(user_id = user.user_id, revoked, "User logged out");
    Ok(Json(MessageResponse::new("Je bent uitgelogd")))
}

/// GET /api/auth/status
///
/// Never fails on a missing or stale token; reports `authenticated: false`.
pub async fn status(
    MaybeAuthUser(auth): MaybeAuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<AuthStatus>> {
    let user = match auth {
        Some(auth) => UserRepo::find_by_id(&state.pool, auth.user_id).await?,
        None => None,
    };
    Ok(Json(AuthStatus {
        authenticated: user.is_some(),
        user: user.map(UserResponse::from),
    }))
}

/// POST /api/auth/change-password
///
/// All refresh sessions are revoked; the current access token stays valid
/// until it expires.
pub async fn change_password(
    RequireAuth(auth): RequireAuth,
    State(state): State<AppState>,
    Json(input): Json<ChangePasswordRequest>,
) -> AppResult<Json<MessageResponse>> {
    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Gebruiker bestaat niet meer".into()))
        })?;

    let current_valid = verify_password(&input.current_password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !current_valid {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Huidig wachtwoord is onjuist".into(),
        )));
    }

    validate_password_strength(&input.new_password, MIN_PASSWORD_LENGTH)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let hash = hash_password(&input.new_password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
    UserRepo::update_password(&state.pool, user.id, &hash).await?;
    SessionRepo::revoke_all_for_user(&state.pool, user.id).await?;

    tracing::info!(user_id = user.id, "Password changed");
    Ok(Json(MessageResponse::new("Wachtwoord gewijzigd")))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn user_agent(headers: &HeaderMap) -> Option<String> {
    headers
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

/// Generate access + refresh tokens, persist a session row, and build the response.
async fn create_auth_response(
    state: &AppState,
    user: User,
    user_agent: Option<String>,
) -> AppResult<AuthResponse> {
    let access_token =
        generate_access_token(user.id, &user.username, user.permissions(), &state.config.jwt)
            .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    let (refresh_plaintext, refresh_hash) = generate_refresh_token();
    let expires_at =
        Utc::now() + chrono::Duration::days(state.config.jwt.refresh_token_expiry_days);

    SessionRepo::create(
        &state.pool,
        &CreateSession {
            user_id: user.id,
            refresh_token_hash: refresh_hash,
            expires_at,
            user_agent,
        },
    )
    .await?;

    Ok(AuthResponse {
        access_token,
        refresh_token: refresh_plaintext,
        expires_in: state.config.jwt.access_token_expiry_mins * 60,
        user: UserResponse::from(user),
    })
}
