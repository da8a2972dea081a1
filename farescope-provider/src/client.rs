use std::time::Duration;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use farescope_core::flight::TransformedFlight;
use farescope_core::search::SearchParams;
use farescope_core::wire::{
    Airport, DatesResponse, FlightDestination, LocationsResponse, OffersResponse,
};
use farescope_engine::transform;

use crate::app_config::ProviderConfig;
use crate::mock;
use crate::token::{Credentials, TokenManager};

/// Read-only client for the flight-offers provider. Every operation follows
/// the same protocol: authorized GET, one forced-refresh retry on 401, and
/// an empty result on any other failure. Errors never cross this boundary.
pub struct ProviderClient {
    http: reqwest::Client,
    tokens: TokenManager,
    base_v1: String,
    base_v2: String,
}

impl ProviderClient {
    pub fn new(config: &ProviderConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        let credentials = match (&config.client_id, &config.client_secret) {
            (Some(client_id), Some(client_secret)) => Some(Credentials {
                client_id: client_id.clone(),
                client_secret: client_secret.clone(),
            }),
            _ => None,
        };

        let tokens = TokenManager::new(
            http.clone(),
            format!("{}/security/oauth2/token", config.base_url_v1),
            credentials,
        );

        Self {
            http,
            tokens,
            base_v1: config.base_url_v1.clone(),
            base_v2: config.base_url_v2.clone(),
        }
    }

    /// True when no upstream credentials are configured and the client
    /// serves deterministic local data instead.
    pub fn is_mock(&self) -> bool {
        !self.tokens.has_credentials()
    }

    pub async fn search_flights(&self, params: &SearchParams) -> Vec<TransformedFlight> {
        if self.is_mock() {
            return mock::flights(params);
        }

        let url = format!("{}/shopping/flight-offers", self.base_v2);
        let mut query: Vec<(&str, String)> = vec![
            ("originLocationCode", params.origin.clone()),
            ("destinationLocationCode", params.destination.clone()),
            ("departureDate", params.date.clone()),
            ("adults", params.adults.clone()),
        ];
        if let Some(return_date) = &params.return_date {
            query.push(("returnDate", return_date.clone()));
        }
        query.push(("max", params.max.clone().unwrap_or_else(|| "20".to_string())));
        query.push(("currencyCode", "EUR".to_string()));

        let body: OffersResponse = match self
            .authorized_get("flight_offers_search", &url, &query)
            .await
        {
            Some(body) => body,
            None => return Vec::new(),
        };

        transform(&body.data, body.dictionaries.as_ref())
    }

    /// Callers are expected to debounce and to skip keywords shorter than
    /// three characters; the API layer enforces the length guard.
    pub async fn search_airports(&self, keyword: &str) -> Vec<Airport> {
        if self.is_mock() {
            return mock::airports(keyword);
        }

        let url = format!("{}/reference-data/locations", self.base_v1);
        let query = [
            ("subType", "CITY".to_string()),
            ("keyword", keyword.to_string()),
        ];

        self.authorized_get::<LocationsResponse>("airport_search", &url, &query)
            .await
            .map(|body| body.data)
            .unwrap_or_default()
    }

    pub async fn cheapest_dates(
        &self,
        origin: &str,
        destination: &str,
        date_range: Option<&str>,
        one_way: bool,
    ) -> Vec<FlightDestination> {
        if self.is_mock() {
            return Vec::new();
        }

        let url = format!("{}/shopping/flight-dates", self.base_v1);
        let mut query: Vec<(&str, String)> = vec![
            ("origin", origin.to_string()),
            ("destination", destination.to_string()),
        ];
        if let Some(range) = date_range {
            query.push(("departureDate", range.to_string()));
        }
        query.push(("oneWay", one_way.to_string()));
        query.push(("viewBy", "DATE".to_string()));

        self.authorized_get::<DatesResponse>("cheapest_dates", &url, &query)
            .await
            .map(|body| body.data)
            .unwrap_or_default()
    }

    /// Shared request protocol: bearer-authorized GET, exactly one forced
    /// token refresh and retry on 401, `None` on anything else.
    async fn authorized_get<T: DeserializeOwned>(
        &self,
        operation: &str,
        url: &str,
        query: &[(&str, String)],
    ) -> Option<T> {
        let token = self.tokens.get_token(false).await;

        let first = self.send(url, query, token.as_deref()).await;
        let response = match first {
            Ok(response) if response.status() == StatusCode::UNAUTHORIZED => {
                tracing::warn!(operation, "upstream returned 401, refreshing token and retrying once");
                match self.tokens.get_token(true).await {
                    Some(fresh) => self.send(url, query, Some(&fresh)).await,
                    None => Ok(response),
                }
            }
            other => other,
        };

        match response {
            Ok(response) if response.status().is_success() => {
                match response.json::<T>().await {
                    Ok(body) => Some(body),
                    Err(err) => {
                        tracing::error!(operation, "failed to decode upstream body: {err}");
                        None
                    }
                }
            }
            Ok(response) => {
                let status = response.status();
                let body = response.text().await.unwrap_or_default();
                tracing::error!(operation, %status, "upstream request failed: {body}");
                None
            }
            Err(err) => {
                tracing::error!(operation, "upstream request error: {err}");
                None
            }
        }
    }

    async fn send(
        &self,
        url: &str,
        query: &[(&str, String)],
        token: Option<&str>,
    ) -> Result<reqwest::Response, reqwest::Error> {
        let mut request = self.http.get(url).query(query);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        request.send().await
    }
}
