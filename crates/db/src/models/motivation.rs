//! Homepage motivation block and its per-location images.

use ontdek_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// The single row from the `motivation` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Motivation {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub button_text: Option<String>,
    pub button_action: Option<String>,
    pub image: Option<String>,
    pub published: bool,
    pub updated_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateMotivation {
    #[validate(length(min = 1, max = 200, message = "Titel is verplicht (maximaal 200 tekens)"))]
    pub title: Option<String>,
    pub description: Option<String>,
    #[validate(length(max = 100, message = "Knoptekst mag maximaal 100 tekens bevatten"))]
    pub button_text: Option<String>,
    pub button_action: Option<String>,
    pub image: Option<String>,
    pub published: Option<bool>,
}

/// A row from `motivation_image_locations`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MotivationImageLocation {
    pub id: DbId,
    pub location_name: String,
    pub image: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Assign an image to a location. Replaces any previous assignment.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpsertMotivationImageLocation {
    #[validate(length(min = 1, max = 200, message = "Locatienaam is verplicht"))]
    pub location_name: String,
    #[validate(length(min = 1, message = "Afbeelding is verplicht"))]
    pub image: String,
}
