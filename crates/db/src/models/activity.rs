//! Activity model and DTOs.

use ontdek_core::content::ContentKind;
use ontdek_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::models::ContentInput;
use crate::repositories::ranked_repo::RankedEntity;

/// A row from the `activities` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Activity {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub location: Option<String>,
    pub category: Option<String>,
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

impl RankedEntity for Activity {
    const KIND: ContentKind = ContentKind::Activity;
    const COLUMNS: &'static str = "id, name, slug, location, category, description, content, \
        image, alt_text, link, published, show_on_homepage, ranking, is_deleted, deleted_at, \
        created_by, created_at, updated_at";

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

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateActivity {
    #[validate(length(min = 1, max = 200, message = "Naam is verplicht (maximaal 200 tekens)"))]
    pub name: String,
    pub slug: Option<String>,
    pub location: Option<String>,
    pub category: Option<String>,
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

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateActivity {
    #[validate(length(min = 1, max = 200, message = "Naam is verplicht (maximaal 200 tekens)"))]
    pub name: Option<String>,
    pub slug: Option<String>,
    pub location: Option<String>,
    pub category: Option<String>,
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

impl ContentInput for CreateActivity {
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

impl ContentInput for UpdateActivity {
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
