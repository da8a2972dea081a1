use axum::extract::{Query, State};
use axum::response::IntoResponse;
use serde::Deserialize;
use serde_json::json;

use crate::cached_json;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AirportQuery {
    #[serde(default)]
    pub keyword: String,
    /// Client generation token for debounced lookups. Echoed back verbatim
    /// so the UI can discard a response that a newer request supersedes.
    #[serde(default)]
    pub seq: Option<u64>,
}

/// GET /api/airports
/// Keywords shorter than three characters never reach upstream; the UI
/// debounces, this guard bounds request volume on top of that.
pub async fn search_airports(
    State(state): State<AppState>,
    Query(query): Query<AirportQuery>,
) -> impl IntoResponse {
    let keyword = query.keyword.trim();
    if keyword.len() < 3 {
        return cached_json(
            state.freshness.airports_seconds,
            json!({ "data": [], "seq": query.seq }),
        );
    }

    let airports = state.provider.search_airports(keyword).await;
    cached_json(
        state.freshness.airports_seconds,
        json!({ "data": airports, "seq": query.seq }),
    )
}
