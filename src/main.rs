//! P&ID Chat - backend server entry point
//!
//! # Startup Sequence
//! 1. Initialize tracing subscriber for logging
//! 2. Resolve the project root and load configuration
//! 3. Create the shared document cache and session store
//! 4. Create Axum router with all endpoints
//! 5. Start HTTP server on configured port
//! 6. Handle graceful shutdown on SIGINT/SIGTERM

use std::net::SocketAddr;

use anyhow::Context;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pnid_chat::api::create_router;
use pnid_chat::{AppConfig, AppState, PathResolver};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing subscriber with env filter
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pnid_chat=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting P&ID Chat Server");

    // Resolve deployment paths and load configuration
    let resolver = PathResolver::from_env();
    let config = AppConfig::load(&resolver);
    info!(
        root = %resolver.project_root().display(),
        model = %config.openai.model,
        mds_dir = %config.directories.mds,
        port = config.server_port,
        "Configuration loaded"
    );

    // Create application state with the shared document cache
    let state = AppState::new(resolver);
    info!("Document cache initialized");

    // Create router with all endpoints
    let app = create_router(state);

    // Bind to configured port
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("Server listening on http://{}", addr);

    // Start server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }
}
