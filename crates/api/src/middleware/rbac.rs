//! Permission extractors.
//!
//! Each extractor wraps [`AuthUser`] and rejects with 403 when the user
//! lacks the flag. Admins pass every check.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use ontdek_core::error::CoreError;
use ontdek_core::permissions::Permission;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

async fn require(
    parts: &mut Parts,
    state: &AppState,
    permission: Permission,
) -> Result<AuthUser, AppError> {
    let user = AuthUser::from_request_parts(parts, state).await?;
    if !user.permissions.allows(permission) {
        tracing::debug!(user_id = user.user_id, ?permission, "Permission denied");
        return Err(AppError::Core(CoreError::Forbidden(
            permission.describe().into(),
        )));
    }
    Ok(user)
}

/// Requires any authenticated user.
pub struct RequireAuth(pub AuthUser);

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        Ok(RequireAuth(user))
    }
}

/// Requires `can_create_content`.
pub struct RequireCreate(pub AuthUser);

impl FromRequestParts<AppState> for RequireCreate {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        require(parts, state, Permission::CreateContent)
            .await
            .map(RequireCreate)
    }
}

/// Requires `can_edit_content`.
pub struct RequireEdit(pub AuthUser);

impl FromRequestParts<AppState> for RequireEdit {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        require(parts, state, Permission::EditContent)
            .await
            .map(RequireEdit)
    }
}

/// Requires `can_delete_content`.
pub struct RequireDelete(pub AuthUser);

impl FromRequestParts<AppState> for RequireDelete {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        require(parts, state, Permission::DeleteContent)
            .await
            .map(RequireDelete)
    }
}

/// Requires `can_manage_users`.
pub struct RequireManageUsers(pub AuthUser);

impl FromRequestParts<AppState> for RequireManageUsers {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        require(parts, state, Permission::ManageUsers)
            .await
            .map(RequireManageUsers)
    }
}

/// Requires `is_admin`.
///
/// ```ignore
/// async fn admin_only(RequireAdmin(user): RequireAdmin) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        require(parts, state, Permission::Admin)
            .await
            .map(RequireAdmin)
    }
}
