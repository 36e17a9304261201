//! Ranked, soft-deletable content collections.
//!
//! Destinations, guides, pages, activities and highlights share the same
//! shape (slug, publication flags, ranking, soft-delete pair). This module
//! names them so the repository and HTTP layers can treat them generically.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::CoreError;

/// One of the content types managed by the ranked collection logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    Destination,
    Guide,
    Page,
    Activity,
    Highlight,
}

impl ContentKind {
    /// Every ranked content kind, in the order used for listings and purges.
    pub const ALL: [ContentKind; 5] = [
        ContentKind::Destination,
        ContentKind::Guide,
        ContentKind::Page,
        ContentKind::Activity,
        ContentKind::Highlight,
    ];

    /// Database table backing this kind.
    pub const fn table(self) -> &'static str {
        match self {
            ContentKind::Destination => "destinations",
            ContentKind::Guide => "guides",
            ContentKind::Page => "pages",
            ContentKind::Activity => "activities",
            ContentKind::Highlight => "highlights",
        }
    }

    /// URL segment under `/api` (identical to the table name).
    pub const fn segment(self) -> &'static str {
        self.table()
    }

    /// Dutch label used in user-facing messages.
    pub const fn label(self) -> &'static str {
        match self {
            ContentKind::Destination => "Bestemming",
            ContentKind::Guide => "Gids",
            ContentKind::Page => "Pagina",
            ContentKind::Activity => "Activiteit",
            ContentKind::Highlight => "Hoogtepunt",
        }
    }

    /// Column holding the human-readable title.
    pub const fn title_column(self) -> &'static str {
        match self {
            ContentKind::Destination | ContentKind::Activity | ContentKind::Highlight => "name",
            ContentKind::Guide | ContentKind::Page => "title",
        }
    }

    /// Column holding the on-disk image path, if the kind carries one.
    pub const fn image_column(self) -> Option<&'static str> {
        match self {
            ContentKind::Destination | ContentKind::Guide | ContentKind::Activity => Some("image"),
            ContentKind::Page => Some("header_image"),
            ContentKind::Highlight => Some("icon"),
        }
    }

    /// Whether a newly created row is published when the request omits the flag.
    pub const fn published_by_default(self) -> bool {
        matches!(self, ContentKind::Destination | ContentKind::Guide)
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table())
    }
}

impl FromStr for ContentKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ContentKind::ALL
            .into_iter()
            .find(|kind| kind.table() == s)
            .ok_or_else(|| CoreError::Validation(format!("Onbekend inhoudstype: {s}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn parses_every_table_name() {
        for kind in ContentKind::ALL {
            assert_eq!(kind.table().parse::<ContentKind>().unwrap(), kind);
        }
    }

    #[test]
    fn rejects_unknown_kind() {
        assert_matches!(
            "templates".parse::<ContentKind>(),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn publication_defaults() {
        assert!(ContentKind::Destination.published_by_default());
        assert!(ContentKind::Guide.published_by_default());
        assert!(!ContentKind::Page.published_by_default());
        assert!(!ContentKind::Highlight.published_by_default());
    }
}
