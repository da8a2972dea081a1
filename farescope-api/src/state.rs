use std::sync::Arc;

use farescope_provider::app_config::FreshnessConfig;
use farescope_provider::ProviderClient;

#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<ProviderClient>,
    pub freshness: FreshnessConfig,
}
