//! Handler for `GET /api/search`.

use axum::extract::{Query, State};
use axum::Json;
use ontdek_core::search::{normalize_filter, SearchScope};
use ontdek_db::models::search::{SearchFilters, SearchHit};
use ontdek_db::repositories::SearchRepo;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::state::AppState;

/// Query parameters for `GET /api/search`.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    pub scope: Option<String>,
    pub location: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub scope: SearchScope,
    /// Always `results.len()`.
    pub total: usize,
    pub results: Vec<SearchHit>,
}

/// GET /api/search?q=&scope=&location=&category=
///
/// Results are grouped by table in scope order. A blank query matches
/// nothing.
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<SearchResponse>> {
    let scope = SearchScope::parse_optional(params.scope.as_deref())?;
    let query = params.q.as_deref().map(str::trim).unwrap_or_default().to_string();

    let results = if query.is_empty() {
        Vec::new()
    } else {
        let filters = SearchFilters {
            location: normalize_filter(params.location.as_deref()),
            category: normalize_filter(params.category.as_deref()),
        };
        SearchRepo::search_all(&state.pool, scope.targets(), &query, &filters).await?
    };

    tracing::debug!(%query, ?scope, total = results.len(), "Search");
    Ok(Json(SearchResponse {
        query,
        scope,
        total: results.len(),
        results,
    }))
}
