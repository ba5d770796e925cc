use std::sync::Arc;

use backoffice_api::config::{Config, LogFormat};
use backoffice_api::store::{FileKvStore, Store};
use backoffice_api::{app, AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::load()?;

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "backoffice_api=debug,tower_http=debug".into());
    let registry = tracing_subscriber::registry().with(filter);
    match config.log.format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
    tracing::info!("Configuration loaded successfully");

    // Open the data sources
    let kv = FileKvStore::new(&config.storage.path);
    tracing::info!(path = %kv.path().display(), "Opening data sources");
    let store = Store::open(Arc::new(kv), config.latency).await?;
    tracing::info!("Data sources ready");

    let state = AppState::new(store, config.clone());

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app(state)).await?;

    Ok(())
}
