use axum::http::{header, HeaderName, Method};
use axum::{routing::get, Json, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod airports;
pub mod calendar;
pub mod error;
pub mod flights;
pub mod state;

pub use state::AppState;

pub fn app(state: AppState) -> Router {
    // CORS Middleware
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/api/flights/search", get(flights::search_flights))
        .route("/api/flights/calendar", get(calendar::month_prices))
        .route("/api/airports", get(airports::search_airports))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// JSON response carrying the freshness window the upstream recommends for
/// this kind of result.
pub(crate) fn cached_json(
    max_age_seconds: u64,
    body: serde_json::Value,
) -> ([(HeaderName, String); 1], Json<serde_json::Value>) {
    (
        [(
            header::CACHE_CONTROL,
            format!("public, max-age={max_age_seconds}"),
        )],
        Json(body),
    )
}
