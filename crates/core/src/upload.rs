//! Upload routing: which folder and which file name an upload lands on.
//!
//! Every supported destination is an explicit [`UploadDestination`]
//! variant. Unknown destinations are rejected instead of falling back to a
//! default folder.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Serialize;

use crate::error::CoreError;
use crate::slug::slugify;
use crate::types::Timestamp;

/// Image extensions accepted for uploads.
pub const ALLOWED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "svg", "ico"];

/// Logical destination declared by the uploader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UploadDestination {
    Background,
    Logo,
    Social,
    Favicon,
    Activities,
    Destinations,
    Guides,
    Highlights,
    Pages,
    Motivatie,
}

impl UploadDestination {
    pub const ALL: [UploadDestination; 10] = [
        UploadDestination::Background,
        UploadDestination::Logo,
        UploadDestination::Social,
        UploadDestination::Favicon,
        UploadDestination::Activities,
        UploadDestination::Destinations,
        UploadDestination::Guides,
        UploadDestination::Highlights,
        UploadDestination::Pages,
        UploadDestination::Motivatie,
    ];

    /// Name used in requests (`destination` form field).
    pub const fn as_str(self) -> &'static str {
        match self {
            UploadDestination::Background => "background",
            UploadDestination::Logo => "logo",
            UploadDestination::Social => "social",
            UploadDestination::Favicon => "favicon",
            UploadDestination::Activities => "activities",
            UploadDestination::Destinations => "destinations",
            UploadDestination::Guides => "guides",
            UploadDestination::Highlights => "highlights",
            UploadDestination::Pages => "pages",
            UploadDestination::Motivatie => "motivatie",
        }
    }

    /// Folder under the images root.
    pub const fn folder(self) -> &'static str {
        match self {
            UploadDestination::Background => "backgrounds",
            UploadDestination::Logo => "logos",
            UploadDestination::Social => "social",
            UploadDestination::Favicon => "favicons",
            UploadDestination::Activities => "activities",
            UploadDestination::Destinations => "destinations",
            UploadDestination::Guides => "guides",
            UploadDestination::Highlights => "highlights",
            UploadDestination::Pages => "headers",
            UploadDestination::Motivatie => "motivatie",
        }
    }

    /// Whether uploads are grouped in a per-location subfolder.
    pub const fn nests_by_location(self) -> bool {
        matches!(
            self,
            UploadDestination::Activities | UploadDestination::Destinations
        )
    }

    /// Site-wide image types exposed under `/site-images/{imageType}`.
    pub fn site_image(image_type: &str) -> Result<Self, CoreError> {
        match image_type {
            "background" => Ok(UploadDestination::Background),
            "logo" => Ok(UploadDestination::Logo),
            "social" => Ok(UploadDestination::Social),
            "favicon" => Ok(UploadDestination::Favicon),
            other => Err(CoreError::Validation(format!(
                "Onbekend afbeeldingstype: {other}"
            ))),
        }
    }
}

impl FromStr for UploadDestination {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        UploadDestination::ALL
            .into_iter()
            .find(|d| d.as_str() == wanted)
            .ok_or_else(|| CoreError::Validation(format!("Onbekende uploadbestemming: {s}")))
    }
}

/// The metadata fields that accompany an uploaded file.
#[derive(Debug, Clone, Default)]
pub struct UploadRequest {
    pub file_name: Option<String>,
    pub entity_name: Option<String>,
    pub location_name: Option<String>,
}

/// Where an upload will be written, relative to the images root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadTarget {
    pub dir: PathBuf,
    pub file_name: String,
}

impl UploadTarget {
    /// Public URL path, e.g. `/images/destinations/krak-w/krak-w.jpg`.
    pub fn public_path(&self) -> String {
        let mut path = String::from("/images");
        for part in self.dir.iter() {
            path.push('/');
            path.push_str(&part.to_string_lossy());
        }
        path.push('/');
        path.push_str(&self.file_name);
        path
    }
}

/// Resolve the directory and file name for an upload.
///
/// The file name is chosen in order of preference: the uploader's custom
/// name, a name derived from the location (or entity) name, and finally a
/// `<folder>-<unix_millis>` fallback. The extension always comes from the
/// original file name.
pub fn resolve_target(
    destination: UploadDestination,
    request: &UploadRequest,
    original_name: &str,
    now: Timestamp,
) -> Result<UploadTarget, CoreError> {
    let ext = extension_of(original_name)?;

    let place = request
        .location_name
        .as_deref()
        .or(request.entity_name.as_deref())
        .and_then(|name| slugify(name).ok());

    let mut dir = PathBuf::from(destination.folder());
    if destination.nests_by_location() {
        if let Some(ref place) = place {
            dir.push(place);
        }
    }

    let custom = request
        .file_name
        .as_deref()
        .and_then(|name| Path::new(name).file_stem())
        .and_then(|stem| slugify(&stem.to_string_lossy()).ok());

    let stem = custom
        .or(place)
        .unwrap_or_else(|| format!("{}-{}", destination.folder(), now.timestamp_millis()));

    Ok(UploadTarget {
        dir,
        file_name: format!("{stem}.{ext}"),
    })
}

/// Lowercased extension of `name`, restricted to [`ALLOWED_EXTENSIONS`].
pub fn extension_of(name: &str) -> Result<String, CoreError> {
    let ext = Path::new(name)
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    if ALLOWED_EXTENSIONS.contains(&ext.as_str()) {
        Ok(ext)
    } else {
        Err(CoreError::Validation(format!(
            "Bestandstype '.{ext}' wordt niet ondersteund. Toegestaan: {}",
            ALLOWED_EXTENSIONS.join(", ")
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::TimeZone;

    fn now() -> Timestamp {
        chrono::Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn unknown_destination_has_no_fallback() {
        assert_matches!(
            "uploads".parse::<UploadDestination>(),
            Err(CoreError::Validation(_))
        );
        assert_eq!(
            "Motivatie".parse::<UploadDestination>().unwrap(),
            UploadDestination::Motivatie
        );
    }

    #[test]
    fn custom_name_wins() {
        let request = UploadRequest {
            file_name: Some("Hero Banner.PNG".into()),
            entity_name: None,
            location_name: Some("Kraków".into()),
        };
        let target = resolve_target(UploadDestination::Destinations, &request, "IMG_001.JPG", now())
            .unwrap();
        assert_eq!(target.dir, PathBuf::from("destinations/krak-w"));
        assert_eq!(target.file_name, "hero-banner.jpg");
        assert_eq!(target.public_path(), "/images/destinations/krak-w/hero-banner.jpg");
    }

    #[test]
    fn location_name_is_second_choice() {
        let request = UploadRequest {
            location_name: Some("Gdańsk".into()),
            ..Default::default()
        };
        let target =
            resolve_target(UploadDestination::Activities, &request, "photo.webp", now()).unwrap();
        assert_eq!(target.dir, PathBuf::from("activities/gda-sk"));
        assert_eq!(target.file_name, "gda-sk.webp");
    }

    #[test]
    fn timestamp_fallback() {
        let target = resolve_target(
            UploadDestination::Background,
            &UploadRequest::default(),
            "x.jpg",
            now(),
        )
        .unwrap();
        assert_eq!(target.dir, PathBuf::from("backgrounds"));
        assert_eq!(
            target.file_name,
            format!("backgrounds-{}.jpg", now().timestamp_millis())
        );
    }

    #[test]
    fn flat_destinations_ignore_location_folder() {
        let request = UploadRequest {
            location_name: Some("Wrocław".into()),
            ..Default::default()
        };
        let target = resolve_target(UploadDestination::Logo, &request, "logo.svg", now()).unwrap();
        assert_eq!(target.dir, PathBuf::from("logos"));
        assert_eq!(target.file_name, "wroc-aw.svg");
    }

    #[test]
    fn rejects_non_image_extension() {
        assert!(extension_of("script.sh").is_err());
        assert!(extension_of("noext").is_err());
        assert_eq!(extension_of("a.JPEG").unwrap(), "jpeg");
    }

    #[test]
    fn site_image_types() {
        assert_eq!(
            UploadDestination::site_image("favicon").unwrap(),
            UploadDestination::Favicon
        );
        assert!(UploadDestination::site_image("activities").is_err());
    }
}
