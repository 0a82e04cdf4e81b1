//! Famwallet API Server
//!
//! Main entry point for the family wallet service.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

use famwallet_api::{AppState, create_router};
use famwallet_db::InMemoryStore;
use famwallet_shared::{AppConfig, LoggingConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;
    init_tracing(&config.logging);

    let store = Arc::new(InMemoryStore::new());
    info!("In-memory store ready");

    let state = AppState::new(store, config.pagination.clone());
    let shutdown = state.shutdown.clone();
    let app = create_router(
        state,
        Duration::from_secs(config.server.request_timeout_secs),
    );

    let addr = config.server.bind_address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!(address = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!(error = %e, "Failed to listen for shutdown signal");
            }
            info!("Shutdown signal received, cancelling in-flight requests");
            shutdown.cancel();
        })
        .await?;

    info!("Server stopped");
    Ok(())
}

fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.filter));

    let fmt_layer = if logging.json {
        tracing_subscriber::fmt::layer().json().boxed()
    } else {
        tracing_subscriber::fmt::layer().boxed()
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}
