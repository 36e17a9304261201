//! Search box configuration model and DTOs.

use ontdek_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `search_configs` table.
///
/// `context` names where the search box is shown (e.g. `home`), and
/// `redirect_pattern` is an optional URL template such as `/zoeken?q={query}`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SearchConfig {
    pub id: DbId,
    pub name: String,
    pub context: String,
    pub placeholder_text: Option<String>,
    pub search_scope: String,
    pub enable_location_filter: bool,
    pub enable_category_filter: bool,
    pub redirect_pattern: Option<String>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateSearchConfig {
    #[validate(length(min = 1, max = 100, message = "Naam is verplicht (maximaal 100 tekens)"))]
    pub name: String,
    /// Defaults to `home`.
    pub context: Option<String>,
    pub placeholder_text: Option<String>,
    /// Defaults to `all`. Checked against the known scopes by the handler.
    pub search_scope: Option<String>,
    pub enable_location_filter: Option<bool>,
    pub enable_category_filter: Option<bool>,
    pub redirect_pattern: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateSearchConfig {
    #[validate(length(min = 1, max = 100, message = "Naam is verplicht (maximaal 100 tekens)"))]
    pub name: Option<String>,
    pub context: Option<String>,
    pub placeholder_text: Option<String>,
    pub search_scope: Option<String>,
    pub enable_location_filter: Option<bool>,
    pub enable_category_filter: Option<bool>,
    pub redirect_pattern: Option<String>,
    pub is_active: Option<bool>,
}
