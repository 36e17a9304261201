//! CMS page model and DTOs.

use ontdek_core::content::ContentKind;
use ontdek_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::models::ContentInput;
use crate::repositories::ranked_repo::RankedEntity;

/// A row from the `pages` table.
///
/// `template` names the layout the frontend renders the page with.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Page {
    pub id: DbId,
    pub title: String,
    pub slug: String,
    pub content: Option<String>,
    pub meta_description: Option<String>,
    pub meta_keywords: Option<String>,
    pub template: Option<String>,
    pub header_image: Option<String>,
    pub published: bool,
    pub show_on_homepage: bool,
    pub ranking: i32,
    pub is_deleted: bool,
    pub deleted_at: Option<Timestamp>,
    pub created_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl RankedEntity for Page {
    const KIND: ContentKind = ContentKind::Page;
    const COLUMNS: &'static str = "id, title, slug, content, meta_description, meta_keywords, \
        template, header_image, published, show_on_homepage, ranking, is_deleted, deleted_at, \
        created_by, created_at, updated_at";

    fn id(&self) -> DbId {
        self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn slug(&self) -> &str {
        &self.slug
    }

    fn is_publicly_visible(&self) -> bool {
        self.published && !self.is_deleted
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePage {
    #[validate(length(min = 1, max = 200, message = "Titel is verplicht (maximaal 200 tekens)"))]
    pub title: String,
    pub slug: Option<String>,
    pub content: Option<String>,
    #[validate(length(max = 320, message = "Metabeschrijving mag maximaal 320 tekens bevatten"))]
    pub meta_description: Option<String>,
    pub meta_keywords: Option<String>,
    pub template: Option<String>,
    pub header_image: Option<String>,
    /// Defaults to `false`; pages start as drafts.
    pub published: Option<bool>,
    pub show_on_homepage: Option<bool>,
    #[validate(range(min = 0, message = "Positie mag niet negatief zijn"))]
    pub ranking: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdatePage {
    #[validate(length(min = 1, max = 200, message = "Titel is verplicht (maximaal 200 tekens)"))]
    pub title: Option<String>,
    pub slug: Option<String>,
    pub content: Option<String>,
    #[validate(length(max = 320, message = "Metabeschrijving mag maximaal 320 tekens bevatten"))]
    pub meta_description: Option<String>,
    pub meta_keywords: Option<String>,
    pub template: Option<String>,
    pub header_image: Option<String>,
    pub published: Option<bool>,
    pub show_on_homepage: Option<bool>,
    #[validate(range(min = 0, message = "Positie mag niet negatief zijn"))]
    pub ranking: Option<i32>,
}

impl ContentInput for CreatePage {
    fn title(&self) -> Option<&str> {
        Some(&self.title)
    }
    fn slug(&self) -> Option<&str> {
        self.slug.as_deref()
    }
    fn ranking(&self) -> Option<i32> {
        self.ranking
    }
}

impl ContentInput for UpdatePage {
    fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }
    fn slug(&self) -> Option<&str> {
        self.slug.as_deref()
    }
    fn ranking(&self) -> Option<i32> {
        self.ranking
    }
}
