use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use ontdek_core::asset_store::AssetError;
use ontdek_core::error::CoreError;
use ontdek_db::repositories::RankingError;
use serde_json::json;

/// Dutch message returned for every sanitised 500.
pub const INTERNAL_ERROR_MESSAGE: &str = "Er is een interne serverfout opgetreden";

/// Internal message of a 500, carried as a response extension.
///
/// The body never contains it; [`crate::middleware::error_detail`] adds it
/// outside production.
#[derive(Debug, Clone)]
pub struct InternalDetail(pub String);

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce `{ "error": "<message>" }` bodies.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `ontdek_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// DTO validation failed.
    #[error("Validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),

    /// An image store failure.
    #[error(transparent)]
    Asset(#[from] AssetError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<RankingError> for AppError {
    fn from(err: RankingError) -> Self {
        match err {
            RankingError::Invalid(core) => AppError::Core(core),
            RankingError::Database(db) => AppError::Database(db),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Core(core) => match core {
                CoreError::NotFound { .. } | CoreError::SlugNotFound { .. } => {
                    (StatusCode::NOT_FOUND, core.to_string())
                }
                CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
                CoreError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
                CoreError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
                CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg.clone()),
                CoreError::Unsupported(msg) => (StatusCode::NOT_IMPLEMENTED, msg.clone()),
                CoreError::Internal(msg) => return internal_error(msg),
            },

            AppError::Database(err) => return classify_sqlx_error(err),

            AppError::Validation(errors) => return validation_error(errors),

            AppError::Asset(err) => match err {
                AssetError::InvalidName(_) => (StatusCode::BAD_REQUEST, err.to_string()),
                AssetError::NotFound(_) => (StatusCode::NOT_FOUND, err.to_string()),
                AssetError::CorruptLog(_) | AssetError::Io(_) => {
                    return internal_error(&err.to_string())
                }
            },

            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::InternalError(msg) => return internal_error(msg),
        };

        (status, axum::Json(json!({ "error": message }))).into_response()
    }
}

/// Log the internal message and return a sanitised 500.
fn internal_error(detail: &str) -> Response {
    tracing::error!(error = %detail, "Internal error");
    let mut response = (
        StatusCode::INTERNAL_SERVER_ERROR,
        axum::Json(json!({ "error": INTERNAL_ERROR_MESSAGE })),
    )
        .into_response();
    response
        .extensions_mut()
        .insert(InternalDetail(detail.to_string()));
    response
}

/// 400 with one `{ field, message }` entry per failed field, sorted by field.
fn validation_error(errors: &validator::ValidationErrors) -> Response {
    let mut details: Vec<serde_json::Value> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            let field = field.to_string();
            errs.iter().map(move |e| {
                let message = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Ongeldige waarde ({})", e.code));
                json!({ "field": field, "message": message })
            })
        })
        .collect();
    details.sort_by(|a, b| a["field"].as_str().cmp(&b["field"].as_str()));

    let body = json!({
        "error": "Validatie mislukt",
        "details": details,
    });
    (StatusCode::BAD_REQUEST, axum::Json(body)).into_response()
}

/// Classify a sqlx error into an HTTP response.
///
/// - `RowNotFound` maps to 404.
/// - Unique violations (`23505`) on a `uq_` constraint map to 409.
/// - Everything else maps to a sanitised 500.
fn classify_sqlx_error(err: &sqlx::Error) -> Response {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            axum::Json(json!({ "error": "Niet gevonden" })),
        )
            .into_response(),
        sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23505") => {
            let constraint = db_err.constraint().unwrap_or("unknown");
            if !constraint.starts_with("uq_") {
                return internal_error(&db_err.to_string());
            }
            let message = if constraint.ends_with("_slug_live") {
                "Deze slug is al in gebruik".to_string()
            } else {
                format!("Deze waarde is al in gebruik ({constraint})")
            };
            (StatusCode::CONFLICT, axum::Json(json!({ "error": message }))).into_response()
        }
        other => internal_error(&other.to_string()),
    }
}
