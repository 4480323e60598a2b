//! Return-sync worker - WMS return reconciliation service.
//!
//! This binary serves the queue event intake on port 3002.
//!
//! # Architecture
//!
//! - Axum web framework receiving queue batch envelopes
//! - Ongoing WMS API for orders, return causes, and return orders
//! - Retailer platform API for mapping records and inspection reports
//!
//! Per-message failures never fail a whole batch: every endpoint answers
//! with a batch-failure report and the transport redelivers the listed
//! items.

#![cfg_attr(not(test), forbid(unsafe_code))]

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use return_sync_worker::config::WorkerConfig;
use return_sync_worker::routes;
use return_sync_worker::state::AppState;

#[tokio::main]
async fn main() {
    // Load .env in development; deployed environments set real variables
    dotenvy::dotenv().ok();

    // Initialize tracing with EnvFilter
    // Defaults to info level for our crate if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "return_sync_worker=info,tower_http=debug".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = WorkerConfig::from_env().expect("Failed to load configuration");
    tracing::info!(
        integrations = config.integrations.len(),
        "loaded warehouse integrations"
    );

    let state = AppState::new(config).expect("Failed to initialize application state");
    let addr = state.config().socket_addr();

    let app = routes::router(state);

    tracing::info!("worker listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
