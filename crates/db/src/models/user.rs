//! User entity model and DTOs.

use ontdek_core::permissions::Permissions;
use ontdek_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Full user row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses directly.
/// Use [`UserResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub is_admin: bool,
    pub can_create_content: bool,
    pub can_edit_content: bool,
    pub can_delete_content: bool,
    pub can_manage_users: bool,
    pub last_login_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl User {
    pub fn permissions(&self) -> Permissions {
        Permissions {
            is_admin: self.is_admin,
            can_create_content: self.can_create_content,
            can_edit_content: self.can_edit_content,
            can_delete_content: self.can_delete_content,
            can_manage_users: self.can_manage_users,
        }
    }
}

/// Safe user representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: DbId,
    pub username: String,
    pub email: String,
    #[serde(flatten)]
    pub permissions: Permissions,
    pub last_login_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            permissions: user.permissions(),
            id: user.id,
            username: user.username,
            email: user.email,
            last_login_at: user.last_login_at,
            created_at: user.created_at,
        }
    }
}

/// Insert payload. The password is already hashed by the caller.
#[derive(Debug)]
pub struct CreateUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub permissions: Permissions,
}

/// Admin request body for creating a user.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 3, max = 50, message = "Gebruikersnaam moet 3 tot 50 tekens bevatten"))]
    pub username: String,
    #[validate(email(message = "Ongeldig e-mailadres"))]
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default = "default_true")]
    pub can_create_content: bool,
    #[serde(default = "default_true")]
    pub can_edit_content: bool,
    #[serde(default)]
    pub can_delete_content: bool,
    #[serde(default)]
    pub can_manage_users: bool,
}

fn default_true() -> bool {
    true
}

impl CreateUserRequest {
    pub fn permissions(&self) -> Permissions {
        Permissions {
            is_admin: self.is_admin,
            can_create_content: self.can_create_content,
            can_edit_content: self.can_edit_content,
            can_delete_content: self.can_delete_content,
            can_manage_users: self.can_manage_users,
        }
    }
}

/// DTO for updating an existing user. All fields are optional.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateUser {
    #[validate(length(min = 3, max = 50, message = "Gebruikersnaam moet 3 tot 50 tekens bevatten"))]
    pub username: Option<String>,
    #[validate(email(message = "Ongeldig e-mailadres"))]
    pub email: Option<String>,
    pub is_admin: Option<bool>,
    pub can_create_content: Option<bool>,
    pub can_edit_content: Option<bool>,
    pub can_delete_content: Option<bool>,
    pub can_manage_users: Option<bool>,
}
