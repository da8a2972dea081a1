use axum::extract::{Query, State};
use axum::response::IntoResponse;
use serde::Deserialize;
use serde_json::json;

use farescope_core::search::SearchParams;
use farescope_engine::{apply, FilterCriteria, SortOption, StopsFilter};

use crate::cached_json;
use crate::error::AppError;
use crate::state::AppState;

/// Optional view parameters on the search endpoint. When none are present
/// the response keeps the upstream offer ordering untouched.
#[derive(Debug, Default, Deserialize)]
pub struct ViewParams {
    #[serde(rename = "minPrice")]
    pub min_price: Option<f64>,
    #[serde(rename = "maxPrice")]
    pub max_price: Option<f64>,
    pub stops: Option<StopsFilter>,
    /// Comma-separated airline names or codes.
    pub airlines: Option<String>,
    pub sort: Option<SortOption>,
}

impl ViewParams {
    fn is_empty(&self) -> bool {
        self.min_price.is_none()
            && self.max_price.is_none()
            && self.stops.is_none()
            && self.airlines.is_none()
            && self.sort.is_none()
    }

    fn criteria(&self) -> FilterCriteria {
        FilterCriteria {
            min_price: self.min_price,
            max_price: self.max_price,
            stops: self.stops.unwrap_or_default(),
            airlines: self
                .airlines
                .as_deref()
                .map(|raw| {
                    raw.split(',')
                        .map(|airline| airline.trim().to_string())
                        .filter(|airline| !airline.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            sort: self.sort.unwrap_or_default(),
        }
    }
}

/// GET /api/flights/search
/// Validate the search form and run the upstream offer search. Validation
/// failures come back as a structured 400 before any upstream call.
pub async fn search_flights(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
    Query(view): Query<ViewParams>,
) -> Result<impl IntoResponse, AppError> {
    let today = chrono::Utc::now().date_naive();
    let params = params.validated(today)?;

    let mut flights = state.provider.search_flights(&params).await;
    if !view.is_empty() {
        flights = apply(&flights, &view.criteria());
    }
    tracing::debug!(
        origin = %params.origin,
        destination = %params.destination,
        results = flights.len(),
        "flight search completed"
    );

    Ok(cached_json(
        state.freshness.offers_seconds,
        json!({ "data": flights }),
    ))
}
