//! User administration.
//!
//! Every route requires `can_manage_users`. Only admins may grant or revoke
//! the admin flag.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use ontdek_core::error::CoreError;
use ontdek_core::types::DbId;
use ontdek_db::models::user::{CreateUser, CreateUserRequest, UpdateUser, UserResponse};
use ontdek_db::repositories::{SessionRepo, UserRepo};
use serde::Deserialize;
use validator::Validate;

use crate::auth::password::{hash_password, validate_password_strength, MIN_PASSWORD_LENGTH};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireManageUsers;
use crate::state::AppState;

/// Request body for `POST /api/admin/users/{id}/reset-password`.
#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub new_password: String,
}

fn user_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Gebruiker",
        id,
    })
}

fn ensure_may_grant_admin(actor: &AuthUser, requested: Option<bool>) -> AppResult<()> {
    if requested.is_some() && !actor.permissions.is_admin {
        return Err(AppError::Core(CoreError::Forbidden(
            "Alleen beheerders kunnen beheerdersrechten toekennen".into(),
        )));
    }
    Ok(())
}

fn hash_new_password(password: &str) -> AppResult<String> {
    validate_password_strength(password, MIN_PASSWORD_LENGTH)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;
    hash_password(password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))
}

/// GET /api/admin/users
pub async fn list(
    RequireManageUsers(_actor): RequireManageUsers,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<UserResponse>>> {
    let users = UserRepo::list(&state.pool).await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// GET /api/admin/users/{id}
pub async fn get_by_id(
    RequireManageUsers(_actor): RequireManageUsers,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<UserResponse>> {
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| user_not_found(id))?;
    Ok(Json(user.into()))
}

/// POST /api/admin/users
pub async fn create(
    RequireManageUsers(actor): RequireManageUsers,
    State(state): State<AppState>,
    Json(input): Json<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    input.validate()?;
    ensure_may_grant_admin(&actor, input.is_admin.then_some(true))?;

    let username = input.username.trim().to_string();
    if UserRepo::find_by_username(&state.pool, &username).await?.is_some() {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Gebruikersnaam '{username}' is al in gebruik"
        ))));
    }

    let password_hash = hash_new_password(&input.password)?;
    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            username,
            email: input.email.trim().to_string(),
            password_hash,
            permissions: input.permissions(),
        },
    )
    .await?;

    tracing::info!(user_id = user.id, created_by = actor.user_id, "User created");
    Ok((StatusCode::CREATED, Json(user.into())))
}

/// PUT /api/admin/users/{id}
pub async fn update(
    RequireManageUsers(actor): RequireManageUsers,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateUser>,
) -> AppResult<Json<UserResponse>> {
    input.validate()?;
    ensure_may_grant_admin(&actor, input.is_admin)?;

    let user = UserRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| user_not_found(id))?;
    tracing::info!(user_id = id, updated_by = actor.user_id, "User updated");
    Ok(Json(user.into()))
}

/// POST /api/admin/users/{id}/reset-password
///
/// Sets a new password and revokes the user's sessions.
pub async fn reset_password(
    RequireManageUsers(actor): RequireManageUsers,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<ResetPasswordRequest>,
) -> AppResult<StatusCode> {
    let hash = hash_new_password(&input.new_password)?;
    if !UserRepo::update_password(&state.pool, id, &hash).await? {
        return Err(user_not_found(id));
    }
    SessionRepo::revoke_all_for_user(&state.pool, id).await?;
    tracing::info!(user_id = id, reset_by = actor.user_id, "Password reset");
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/admin/users/{id}
pub async fn delete(
    RequireManageUsers(actor): RequireManageUsers,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if actor.user_id == id {
        return Err(AppError::Core(CoreError::Conflict(
            "Je kunt je eigen account niet verwijderen".into(),
        )));
    }
    if !UserRepo::delete(&state.pool, id).await? {
        return Err(user_not_found(id));
    }
    tracing::info!(user_id = id, deleted_by = actor.user_id, "User deleted");
    Ok(StatusCode::NO_CONTENT)
}
