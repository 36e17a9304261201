//! Search scope parsing and `ILIKE` pattern helpers.
//!
//! Search is a flat substring match per table; there is no scoring, so the
//! only logic worth keeping outside SQL is deciding which tables to query
//! and escaping the user's text.

use std::str::FromStr;

use serde::Serialize;

use crate::error::CoreError;

/// A table that participates in search, used as the `type` tag on hits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchTarget {
    Destination,
    Activity,
    Guide,
    Highlight,
    Page,
    Template,
}

impl SearchTarget {
    /// Discriminator written into each result's `type` field.
    pub const fn tag(self) -> &'static str {
        match self {
            SearchTarget::Destination => "destination",
            SearchTarget::Activity => "activity",
            SearchTarget::Guide => "guide",
            SearchTarget::Highlight => "highlight",
            SearchTarget::Page => "page",
            SearchTarget::Template => "template",
        }
    }
}

/// Which tables a search request covers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchScope {
    #[default]
    All,
    Destinations,
    Activities,
    Guides,
    Highlights,
    Pages,
    Templates,
    /// Body-bearing content: pages and templates.
    Content,
}

impl SearchScope {
    /// Tables queried for this scope, in result order.
    pub fn targets(self) -> &'static [SearchTarget] {
        use SearchTarget::*;
        match self {
            SearchScope::All => &[Destination, Activity, Guide, Highlight, Page, Template],
            SearchScope::Destinations => &[Destination],
            SearchScope::Activities => &[Activity],
            SearchScope::Guides => &[Guide],
            SearchScope::Highlights => &[Highlight],
            SearchScope::Pages => &[Page],
            SearchScope::Templates => &[Template],
            SearchScope::Content => &[Page, Template],
        }
    }

    /// Parse an optional `scope` query value. Absent or empty means `All`.
    pub fn parse_optional(raw: Option<&str>) -> Result<Self, CoreError> {
        match raw.map(str::trim) {
            None | Some("") => Ok(SearchScope::All),
            Some(s) => s.parse(),
        }
    }
}

impl FromStr for SearchScope {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(SearchScope::All),
            "destinations" => Ok(SearchScope::Destinations),
            "activities" => Ok(SearchScope::Activities),
            "guides" => Ok(SearchScope::Guides),
            "highlights" => Ok(SearchScope::Highlights),
            "pages" => Ok(SearchScope::Pages),
            "templates" => Ok(SearchScope::Templates),
            "content" => Ok(SearchScope::Content),
            other => Err(CoreError::Validation(format!(
                "Onbekend zoekbereik: {other}"
            ))),
        }
    }
}

/// Build a `%...%` pattern for `ILIKE`, escaping the wildcard characters.
///
/// ```
/// use ontdek_core::search::like_pattern;
///
/// assert_eq!(like_pattern("krak"), "%krak%");
/// assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
/// ```
pub fn like_pattern(query: &str) -> String {
    let mut pattern = String::with_capacity(query.len() + 2);
    pattern.push('%');
    for c in query.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Normalise an optional filter value: trimmed, `None` when blank.
pub fn normalize_filter(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
