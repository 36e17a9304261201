//! Destination entity model and DTOs.

use ontdek_core::content::ContentKind;
use ontdek_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::models::ContentInput;
use crate::repositories::ranked_repo::RankedEntity;

/// A row from the `destinations` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Destination {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub content: Option<String>,
    pub image: Option<String>,
    pub alt_text: Option<String>,
    pub link: Option<String>,
    pub published: bool,
    pub show_on_homepage: bool,
    pub ranking: i32,
    pub is_deleted: bool,
    pub deleted_at: Option<Timestamp>,
    pub created_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl RankedEntity for Destination {
    const KIND: ContentKind = ContentKind::Destination;
    const COLUMNS: &'static str = "id, name, slug, description, content, image, alt_text, link, \
        published, show_on_homepage, ranking, is_deleted, deleted_at, created_by, created_at, updated_at";

    fn id(&self) -> DbId {
        self.id
    }

    fn title(&self) -> &str {
        &self.name
    }

    fn slug(&self) -> &str {
        &self.slug
    }

    fn is_publicly_visible(&self) -> bool {
        self.published && !self.is_deleted
    }
}

/// DTO for creating a destination.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateDestination {
    #[validate(length(min = 1, max = 200, message = "Naam is verplicht (maximaal 200 tekens)"))]
    pub name: String,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub content: Option<String>,
    pub image: Option<String>,
    #[validate(length(max = 300, message = "Alt-tekst mag maximaal 300 tekens bevatten"))]
    pub alt_text: Option<String>,
    pub link: Option<String>,
    /// Defaults to `true`.
    pub published: Option<bool>,
    /// Defaults to `true`.
    pub show_on_homepage: Option<bool>,
    /// Appended at the end of the live set when omitted.
    #[validate(range(min = 0, message = "Positie mag niet negatief zijn"))]
    pub ranking: Option<i32>,
}

/// DTO for updating a destination. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateDestination {
    #[validate(length(min = 1, max = 200, message = "Naam is verplicht (maximaal 200 tekens)"))]
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub content: Option<String>,
    pub image: Option<String>,
    #[validate(length(max = 300, message = "Alt-tekst mag maximaal 300 tekens bevatten"))]
    pub alt_text: Option<String>,
    pub link: Option<String>,
    pub published: Option<bool>,
    pub show_on_homepage: Option<bool>,
    #[validate(range(min = 0, message = "Positie mag niet negatief zijn"))]
    pub ranking: Option<i32>,
}

impl ContentInput for CreateDestination {
    fn title(&self) -> Option<&str> {
        Some(&self.name)
    }
    fn slug(&self) -> Option<&str> {
        self.slug.as_deref()
    }
    fn ranking(&self) -> Option<i32> {
        self.ranking
    }
}

impl ContentInput for UpdateDestination {
    fn title(&self) -> Option<&str> {
        self.name.as_deref()
    }
    fn slug(&self) -> Option<&str> {
        self.slug.as_deref()
    }
    fn ranking(&self) -> Option<i32> {
        self.ranking
    }
}
