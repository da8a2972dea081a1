use axum::extract::{Query, State};
use axum::response::IntoResponse;
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;

use farescope_engine::calendar;

use crate::cached_json;
use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CalendarQuery {
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub date: Option<String>,
}

/// GET /api/flights/calendar
/// A month of per-day prices for the trend view: cheapest-dates data when
/// credentials are configured, the deterministic generator otherwise.
pub async fn month_prices(
    State(state): State<AppState>,
    Query(query): Query<CalendarQuery>,
) -> Result<impl IntoResponse, AppError> {
    let origin = query
        .origin
        .filter(|v| !v.is_empty())
        .ok_or(AppError::MissingParameter("origin"))?;
    let destination = query
        .destination
        .filter(|v| !v.is_empty())
        .ok_or(AppError::MissingParameter("destination"))?;
    let date = query
        .date
        .filter(|v| !v.is_empty())
        .ok_or(AppError::MissingParameter("date"))?;

    let day = NaiveDate::parse_from_str(&date, "%Y-%m-%d")
        .map_err(|_| AppError::ValidationError(format!("date must be YYYY-MM-DD, got {date:?}")))?;

    let points = if state.provider.is_mock() {
        calendar::generate(&origin, &destination, day)
    } else {
        let (start, end) = calendar::month_bounds(day);
        let range = format!("{start},{end}");
        let rows = state
            .provider
            .cheapest_dates(&origin, &destination, Some(&range), true)
            .await;
        calendar::from_cheapest_dates(&rows)
    };

    Ok(cached_json(
        state.freshness.dates_seconds,
        json!({ "data": points }),
    ))
}
