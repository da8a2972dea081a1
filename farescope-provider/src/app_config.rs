use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub provider: ProviderConfig,
    pub freshness: FreshnessConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ProviderConfig {
    pub base_url_v1: String,
    pub base_url_v2: String,
    /// Credentials are optional: absence switches the client to mock mode
    /// instead of failing startup.
    #[serde(default)]
    pub client_id: Option<String>,
    #[serde(default)]
    pub client_secret: Option<String>,
    #[serde(default = "default_timeout_seconds")]
    pub request_timeout_seconds: u64,
}

fn default_timeout_seconds() -> u64 {
    10
}

/// Result-freshness windows advertised to callers as `Cache-Control`
/// max-age. A cost/freshness tradeoff, not a correctness requirement.
#[derive(Debug, Deserialize, Clone)]
pub struct FreshnessConfig {
    pub offers_seconds: u64,
    pub airports_seconds: u64,
    pub dates_seconds: u64,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            // Start off by merging in the "default" configuration file
            .add_source(config::File::with_name("config/default"))
            // Add in the current environment file
            // Default to 'development' env
            // Note that this file is _optional_
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Add in a local configuration file
            // This file shouldn't be checked in to git
            .add_source(config::File::with_name("config/local").required(false))
            // Add in settings from the environment (with a prefix of FARESCOPE)
            // Eg. `FARESCOPE_PROVIDER__CLIENT_ID=...` sets provider.client_id
            .add_source(config::Environment::with_prefix("FARESCOPE").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
