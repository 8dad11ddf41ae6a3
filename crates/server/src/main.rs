//! Chainwait Server - Waitlist HTTP service.
//!
//! This binary serves the waitlist API on port 3000.
//!
//! # Architecture
//!
//! - Axum web framework with a JSON API surface
//! - Pluggable storage: append-only CSV files or SQLite tables
//! - Google identity assertions verified out-of-process via tokeninfo
//!
//! The decorative activity widget (`chainwait-widget`) is a separate
//! client-side component; the only coupling is the HTTP surface here.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use chainwait_server::config::ServerConfig;
use chainwait_server::routes;
use chainwait_server::services::GoogleVerifier;
use chainwait_server::state::AppState;
use chainwait_server::store;

#[tokio::main]
async fn main() {
    // Load configuration from environment
    let config = ServerConfig::from_env().expect("Failed to load configuration");

    // Initialize tracing with EnvFilter
    // Defaults to info level for our crate if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "chainwait_server=info,tower_http=debug".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Initialize the storage backend selected by configuration
    let store = store::make_store(&config.storage)
        .await
        .expect("Failed to initialize storage backend");
    tracing::info!("Storage backend ready");

    let verifier = Arc::new(GoogleVerifier::new(config.google_client_id.clone()));
    if config.google_client_id.is_none() {
        tracing::warn!("GOOGLE_CLIENT_ID unset; /signup/google will reject all assertions");
    }

    // Build application state and router
    let state = AppState::new(config.clone(), store, verifier);
    let app = routes::app(state);

    // Start server
    let addr = config.socket_addr();
    tracing::info!("chainwait-server listening on {}", addr);

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
