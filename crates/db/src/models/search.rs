//! Search result rows.

use ontdek_core::types::DbId;
use serde::Serialize;
use sqlx::FromRow;

/// One match, normalised across tables.
///
/// `type` is the discriminator naming the source table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SearchHit {
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: String,
    pub id: DbId,
    pub title: String,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
}

/// Optional narrowing filters for destination/activity/highlight searches.
#[derive(Debug, Clone, Default)]
pub struct SearchFilters {
    pub location: Option<String>,
    pub category: Option<String>,
}
