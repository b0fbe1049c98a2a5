mod api;
mod config;
mod ratings;
mod storage;

use crate::api::AppState;
use crate::config::AppConfig;
use crate::ratings::RatingAggregator;
use crate::storage::SupabaseStore;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_thread_ids(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!("🚀 Starting Recipe Ratings Service");

    // Load configuration; missing store credentials stop us here
    let config = AppConfig::load()?;
    info!("📋 Configuration loaded");
    info!("   - Store: {}", config.store.url);
    info!("   - Ratings table: {}", config.tables.ratings);
    info!("   - Stats table: {}", config.tables.stats);
    info!("   - Server: {}:{}", config.server.host, config.server.port);

    // Initialize store client
    let store = SupabaseStore::new(&config.store, &config.tables)?;
    info!("✅ Store client ready");

    let state = AppState {
        aggregator: RatingAggregator::new(Arc::new(store)),
    };

    let app = api::router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("🌐 Server listening on http://{}", addr);
    info!("");
    info!("📡 Available endpoints:");
    info!("   GET  /health            - Health check");
    info!("   POST /webhooks/ratings  - Recompute stats for a rated recipe");
    info!("");
    info!("✨ Server is ready to accept requests!");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("👋 Server shutting down gracefully");

    Ok(())
}

/// Graceful shutdown handler
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("🛑 Shutdown signal received");
}
