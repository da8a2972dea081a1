use std::sync::Arc;

use tokio::sync::Mutex;

use farescope_core::wire::TokenResponse;

/// Tokens are considered expired this long before the upstream TTL, so a
/// request started just under the wire can't carry a token that dies
/// mid-flight.
const EXPIRY_SAFETY_MARGIN_MS: i64 = 30_000;

/// Time source for expiry checks. Injectable so tests drive refresh
/// behavior with a fake clock instead of sleeping.
pub trait Clock: Send + Sync {
    fn now_millis(&self) -> i64;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

#[derive(Debug, Clone)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

struct CachedToken {
    value: String,
    expires_at_millis: i64,
}

/// Owns the OAuth2 client-credentials bearer token: one per process,
/// explicitly constructed and injected rather than hidden in a global.
///
/// The cache lock is held across the grant exchange, so concurrent callers
/// that all find the token expired coalesce onto a single refresh.
pub struct TokenManager {
    http: reqwest::Client,
    token_url: String,
    credentials: Option<Credentials>,
    clock: Arc<dyn Clock>,
    cached: Mutex<Option<CachedToken>>,
}

impl TokenManager {
    pub fn new(http: reqwest::Client, token_url: String, credentials: Option<Credentials>) -> Self {
        Self::with_clock(http, token_url, credentials, Arc::new(SystemClock))
    }

    pub fn with_clock(
        http: reqwest::Client,
        token_url: String,
        credentials: Option<Credentials>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            http,
            token_url,
            credentials,
            clock,
            cached: Mutex::new(None),
        }
    }

    pub fn has_credentials(&self) -> bool {
        self.credentials.is_some()
    }

    /// Return a usable bearer token, or `None` when none can be had.
    ///
    /// `None` covers both configuration absence (mock mode) and a failed
    /// grant exchange; neither is an error to the caller, which proceeds
    /// unauthenticated and lets the data endpoint reject with 401.
    pub async fn get_token(&self, force_refresh: bool) -> Option<String> {
        let credentials = match &self.credentials {
            Some(credentials) => credentials,
            None => {
                tracing::warn!("provider credentials not configured, running in mock mode");
                return None;
            }
        };

        let mut cached = self.cached.lock().await;

        if !force_refresh {
            if let Some(token) = cached.as_ref() {
                if self.clock.now_millis() < token.expires_at_millis {
                    return Some(token.value.clone());
                }
            }
        }

        let form = [
            ("grant_type", "client_credentials"),
            ("client_id", credentials.client_id.as_str()),
            ("client_secret", credentials.client_secret.as_str()),
        ];

        let response = match self.http.post(&self.token_url).form(&form).send().await {
            Ok(response) => response,
            Err(err) => {
                tracing::error!("token endpoint unreachable: {err}");
                return None;
            }
        };

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(%status, "client-credentials grant rejected: {body}");
            return None;
        }

        match response.json::<TokenResponse>().await {
            Ok(grant) => {
                let expires_at_millis = self.clock.now_millis()
                    + grant.expires_in as i64 * 1000
                    - EXPIRY_SAFETY_MARGIN_MS;
                let value = grant.access_token.clone();
                *cached = Some(CachedToken {
                    value: grant.access_token,
                    expires_at_millis,
                });
                Some(value)
            }
            Err(err) => {
                tracing::error!("token endpoint returned an unreadable body: {err}");
                None
            }
        }
    }
}
