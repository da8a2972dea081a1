use std::net::SocketAddr;
use std::sync::Arc;

use farescope_api::{app, AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "farescope_api=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = farescope_provider::app_config::Config::load().expect("Failed to load config");
    tracing::info!("Starting Farescope API on port {}", config.server.port);

    let provider = Arc::new(farescope_provider::ProviderClient::new(&config.provider));
    if provider.is_mock() {
        tracing::warn!("No provider credentials configured, serving deterministic mock data");
    }

    let app_state = AppState {
        provider,
        freshness: config.freshness.clone(),
    };

    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind server port");
    axum::serve(listener, app).await.expect("Server failed");
}
