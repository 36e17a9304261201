//! Page template model and DTOs.

use ontdek_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `templates` table.
///
/// `fields` describes the editable layout slots as a JSON array.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Template {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub content: Option<String>,
    pub fields: serde_json::Value,
    pub created_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTemplate {
    #[validate(length(min = 1, max = 100, message = "Naam is verplicht (maximaal 100 tekens)"))]
    pub name: String,
    pub description: Option<String>,
    pub content: Option<String>,
    /// Defaults to an empty array.
    pub fields: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateTemplate {
    #[validate(length(min = 1, max = 100, message = "Naam is verplicht (maximaal 100 tekens)"))]
    pub name: Option<String>,
    pub description: Option<String>,
    pub content: Option<String>,
    pub fields: Option<serde_json::Value>,
}
