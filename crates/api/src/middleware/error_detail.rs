//! Adds the internal message to 500 bodies outside production.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::error::{InternalDetail, INTERNAL_ERROR_MESSAGE};
use crate::state::AppState;

/// Rewrites a sanitised 500 as `{ "error", "detail" }` unless
/// `APP_ENV=production`.
pub async fn expose_internal_detail(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let mut response = next.run(request).await;
    let Some(InternalDetail(detail)) = response.extensions_mut().remove::<InternalDetail>() else {
        return response;
    };
    if state.config.is_production() {
        return response;
    }
    (
        response.status(),
        axum::Json(json!({ "error": INTERNAL_ERROR_MESSAGE, "detail": detail })),
    )
        .into_response()
}
