//! Image uploads and the managed image folders.
//!
//! Every write first checks that the platform has a writable filesystem and
//! answers 501 otherwise, before any filesystem I/O. Overwrites never lose
//! data: the store archives same-stem files into `.trash` first.

use std::path::PathBuf;

use axum::body::Bytes;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use ontdek_core::asset_store::{AssetInfo, PurgeReport, StoredAsset, TrashEntry};
use ontdek_core::error::CoreError;
use ontdek_core::slug::slugify;
use ontdek_core::types::DbId;
use ontdek_core::upload::{resolve_target, UploadDestination, UploadRequest};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{RequireAdmin, RequireAuth, RequireCreate, RequireDelete};
use crate::state::AppState;

/// Default stem for favicon uploads without a custom name.
const FAVICON_STEM: &str = "favicon";

/// Response body for a successful upload.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub destination: UploadDestination,
    pub entity_id: Option<DbId>,
    #[serde(flatten)]
    pub stored: StoredAsset,
}

/// Optional per-location subfolder for nested destinations.
#[derive(Debug, Default, Deserialize)]
pub struct FolderParams {
    pub location: Option<String>,
}

/// The multipart fields of an upload request.
#[derive(Debug, Default)]
struct UploadForm {
    destination: Option<String>,
    file_name: Option<String>,
    entity_id: Option<String>,
    entity_name: Option<String>,
    location_name: Option<String>,
    original_name: Option<String>,
    data: Option<Bytes>,
}

// ---------------------------------------------------------------------------
// Uploads
// ---------------------------------------------------------------------------

/// POST /api/upload
///
/// Multipart fields: `file`, `destination`, `fileName`, `entityId`,
/// `entityName`, `locationName`.
pub async fn upload(
    RequireCreate(user): RequireCreate,
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<UploadResponse>)> {
    ensure_writable(&state)?;
    let form = read_form(multipart).await?;
    let destination: UploadDestination = form
        .destination
        .as_deref()
        .ok_or_else(|| AppError::BadRequest("Uploadbestemming ontbreekt".into()))?
        .parse()?;
    store_upload(&state, &user, destination, form).await
}

/// POST /api/upload/favicon
///
/// Same fields as [`upload`]; the destination is always the favicon folder
/// and the name defaults to `favicon.<ext>`.
pub async fn upload_favicon(
    RequireCreate(user): RequireCreate,
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<UploadResponse>)> {
    ensure_writable(&state)?;
    let mut form = read_form(multipart).await?;
    if form.file_name.is_none() {
        form.file_name = Some(FAVICON_STEM.to_string());
    }
    store_upload(&state, &user, UploadDestination::Favicon, form).await
}

async fn store_upload(
    state: &AppState,
    user: &AuthUser,
    destination: UploadDestination,
    form: UploadForm,
) -> AppResult<(StatusCode, Json<UploadResponse>)> {
    let data = form
        .data
        .filter(|d| !d.is_empty())
        .ok_or_else(|| AppError::BadRequest("Geen bestand ontvangen".into()))?;
    let original_name = form.original_name.unwrap_or_default();

    let entity_id = form
        .entity_id
        .map(|raw| {
            raw.parse::<DbId>()
                .map_err(|_| AppError::BadRequest(format!("Ongeldig entityId: {raw}")))
        })
        .transpose()?;

    let request = UploadRequest {
        file_name: form.file_name,
        entity_name: form.entity_name,
        location_name: form.location_name,
    };
    let target = resolve_target(destination, &request, &original_name, chrono::Utc::now())?;
    let stored = state.assets.store(&target, &data).await?;

    tracing::info!(
        user_id = user.user_id,
        destination = destination.as_str(),
        entity_id,
        path = %stored.path,
        "Image uploaded",
    );
    Ok((
        StatusCode::CREATED,
        Json(UploadResponse {
            destination,
            entity_id,
            stored,
        }),
    ))
}

async fn read_form(mut multipart: Multipart) -> AppResult<UploadForm> {
    let mut form = UploadForm::default();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Ongeldige upload: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        if name == "file" {
            form.original_name = field.file_name().map(str::to_string);
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(format!("Bestand kon niet worden gelezen: {e}")))?;
            form.data = Some(bytes);
            continue;
        }

        let text = field
            .text()
            .await
            .map_err(|e| AppError::BadRequest(format!("Ongeldig formulierveld '{name}': {e}")))?;
        let value = Some(text.trim().to_string()).filter(|v| !v.is_empty());
        match name.as_str() {
            "destination" => form.destination = value,
            "fileName" => form.file_name = value,
            "entityId" => form.entity_id = value,
            "entityName" => form.entity_name = value,
            "locationName" => form.location_name = value,
            other => tracing::debug!(field = other, "Ignoring unknown upload field"),
        }
    }
    Ok(form)
}

// ---------------------------------------------------------------------------
// Favicons and site images
// ---------------------------------------------------------------------------

/// GET /api/favicons
pub async fn list_favicons(State(state): State<AppState>) -> AppResult<Json<Vec<AssetInfo>>> {
    let dir = PathBuf::from(UploadDestination::Favicon.folder());
    Ok(Json(state.assets.list(&dir).await?))
}

/// DELETE /api/favicons/{filename}
///
/// Moves the file to the folder's trash.
pub async fn delete_favicon(
    RequireDelete(_user): RequireDelete,
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> AppResult<Json<TrashEntry>> {
    ensure_writable(&state)?;
    let dir = PathBuf::from(UploadDestination::Favicon.folder());
    Ok(Json(state.assets.delete(&dir, &filename).await?))
}

/// GET /api/site-images/{image_type}
pub async fn list_site_images(
    State(state): State<AppState>,
    Path(image_type): Path<String>,
) -> AppResult<Json<Vec<AssetInfo>>> {
    let dir = PathBuf::from(UploadDestination::site_image(&image_type)?.folder());
    Ok(Json(state.assets.list(&dir).await?))
}

/// DELETE /api/site-images/{image_type}/{filename}
pub async fn delete_site_image(
    RequireDelete(_user): RequireDelete,
    State(state): State<AppState>,
    Path((image_type, filename)): Path<(String, String)>,
) -> AppResult<Json<TrashEntry>> {
    ensure_writable(&state)?;
    let dir = PathBuf::from(UploadDestination::site_image(&image_type)?.folder());
    Ok(Json(state.assets.delete(&dir, &filename).await?))
}

// ---------------------------------------------------------------------------
// Upload trash
// ---------------------------------------------------------------------------

/// GET /api/admin/uploads/{destination}/trash?location=
pub async fn list_upload_trash(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Path(destination): Path<String>,
    Query(params): Query<FolderParams>,
) -> AppResult<Json<Vec<TrashEntry>>> {
    let dir = upload_dir(&destination, params.location.as_deref())?;
    Ok(Json(state.assets.list_trash(&dir).await?))
}

/// DELETE /api/admin/uploads/{destination}/trash?location=
///
/// Permanently deletes the archived files of one folder.
pub async fn purge_upload_trash(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(destination): Path<String>,
    Query(params): Query<FolderParams>,
) -> AppResult<Json<PurgeReport>> {
    ensure_writable(&state)?;
    let dir = upload_dir(&destination, params.location.as_deref())?;
    let report = state.assets.purge_trash(&dir).await?;
    tracing::info!(
        user_id = admin.user_id,
        dir = %dir.display(),
        files = report.files_deleted,
        bytes = report.bytes_reclaimed,
        "Upload trash purged",
    );
    Ok(Json(report))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// 501 when the platform cannot write to disk.
fn ensure_writable(state: &AppState) -> AppResult<()> {
    if state.config.uploads_enabled() {
        return Ok(());
    }
    Err(AppError::Core(CoreError::Unsupported(format!(
        "Bestandsbeheer is niet beschikbaar op {}: het bestandssysteem is alleen-lezen",
        state.config.platform
    ))))
}

fn upload_dir(destination: &str, location: Option<&str>) -> AppResult<PathBuf> {
    let destination: UploadDestination = destination.parse()?;
    let mut dir = PathBuf::from(destination.folder());
    if let Some(location) = location.filter(|l| !l.trim().is_empty()) {
        if !destination.nests_by_location() {
            return Err(AppError::BadRequest(format!(
                "Bestemming '{}' heeft geen locatiemappen",
                destination.as_str()
            )));
        }
        dir.push(slugify(location)?);
    }
    Ok(dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn upload_dir_nests_locations() {
        assert_eq!(
            upload_dir("destinations", Some("Kraków")).unwrap(),
            PathBuf::from("destinations/krak-w")
        );
        assert_eq!(upload_dir("logo", None).unwrap(), PathBuf::from("logos"));
    }

    #[test]
    fn upload_dir_rejects_unknown_and_flat_locations() {
        assert_matches!(
            upload_dir("elsewhere", None),
            Err(AppError::Core(CoreError::Validation(_)))
        );
        assert_matches!(
            upload_dir("logo", Some("Gdańsk")),
            Err(AppError::BadRequest(_))
        );
    }
}
