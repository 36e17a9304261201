//! URL slug generation.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::CoreError;

/// Any run of characters that may not appear in a slug.
static NON_SLUG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9]+").expect("valid regex"));

/// Slugs that collide with fixed routes under a content collection.
pub const RESERVED_SLUGS: &[&str] = &["homepage"];

/// Derive a URL-safe slug from a title or name.
///
/// Lowercases the input, collapses every run of characters outside
/// `[a-z0-9]` into a single `-` and trims dashes at both ends. Non-ASCII
/// letters are not transliterated.
///
/// ```
/// use ontdek_core::slug::slugify;
///
/// assert_eq!(slugify("Kraków").unwrap(), "krak-w");
/// assert_eq!(slugify("  Oude Stad & Wawel ").unwrap(), "oude-stad-wawel");
/// assert!(slugify("!!!").is_err());
/// ```
pub fn slugify(text: &str) -> Result<String, CoreError> {
    let lowered = text.to_lowercase();
    let slug = NON_SLUG_RE.replace_all(&lowered, "-");
    let slug = slug.trim_matches('-');
    if slug.is_empty() {
        return Err(CoreError::Validation(format!(
            "Kan geen geldige slug maken van '{text}'"
        )));
    }
    Ok(slug.to_string())
}

/// Validate an explicitly supplied slug: it must already be in normal form.
pub fn validate_slug(slug: &str) -> Result<(), CoreError> {
    match slugify(slug) {
        Ok(normal) if normal == slug => Ok(()),
        _ => Err(CoreError::Validation(format!(
            "Ongeldige slug '{slug}': gebruik alleen kleine letters, cijfers en streepjes"
        ))),
    }
}

/// Reject slugs that a content row could never be fetched by.
pub fn ensure_not_reserved(slug: &str) -> Result<(), CoreError> {
    if RESERVED_SLUGS.contains(&slug) {
        return Err(CoreError::Validation(format!(
            "De slug '{slug}' is gereserveerd; kies een andere slug"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polish_names_keep_ascii_letters() {
        assert_eq!(slugify("Kraków").unwrap(), "krak-w");
        assert_eq!(slugify("Gdańsk").unwrap(), "gda-sk");
        assert_eq!(slugify("Zakopane").unwrap(), "zakopane");
    }

    #[test]
    fn collapses_separators() {
        assert_eq!(slugify("Wandelen -- in de  Tatra!").unwrap(), "wandelen-in-de-tatra");
    }

    #[test]
    fn same_slug_for_differently_cased_names() {
        assert_eq!(slugify("WARSCHAU").unwrap(), slugify("warschau").unwrap());
    }

    #[test]
    fn empty_slug_is_rejected() {
        assert!(slugify("").is_err());
        assert!(slugify("ąę").is_err());
    }

    #[test]
    fn explicit_slug_must_be_normalised() {
        assert!(validate_slug("oude-stad").is_ok());
        assert!(validate_slug("Oude Stad").is_err());
        assert!(validate_slug("-oude").is_err());
    }

    #[test]
    fn route_names_are_reserved() {
        assert!(ensure_not_reserved("homepage").is_err());
        assert!(ensure_not_reserved(&slugify("Homepage").unwrap()).is_err());
        assert!(ensure_not_reserved("homepage-krakau").is_ok());
    }
}
