//! Application builder: wires router, middleware, and state into an Axum app,
//! and runs the server.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::middleware as axum_middleware;
use tokio::sync::watch;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use seathold_core::config::AppConfig;
use seathold_core::error::AppError;
use seathold_core::result::AppResult;
use seathold_core::traits::SystemClock;
use seathold_lock::{LeaseSweeper, LockManager, SeatStore};

use crate::middleware::cors::build_cors_layer;
use crate::middleware::logging::request_logging;
use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    let cors = build_cors_layer(&state.config.server.cors);

    build_router(state)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(request_logging))
}

/// Runs the SeatHold server with the given configuration.
pub async fn run_server(config: AppConfig) -> AppResult<()> {
    tracing::info!("Starting SeatHold v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Persistence gateway ──────────────────────────────
    tracing::info!(
        "Initializing seat store (provider: {})...",
        config.store.provider
    );
    let gateway = seathold_storage::build_gateway(&config.store).await?;

    // ── Step 2: Seat store & lock manager ────────────────────────
    let store = Arc::new(SeatStore::open(gateway).await?);
    let lock_manager = Arc::new(LockManager::new(
        store,
        Arc::new(SystemClock),
        config.lease.clone(),
    ));

    // ── Step 3: Shutdown channel & sweeper ───────────────────────
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let sweeper_handle = if config.lease.sweep_interval_seconds > 0 {
        let sweeper =
            LeaseSweeper::new(Arc::clone(&lock_manager), config.lease.sweep_interval_seconds);
        let cancel = shutdown_rx.clone();
        Some(tokio::spawn(async move {
            sweeper.run(cancel).await;
        }))
    } else {
        tracing::info!("Lease sweeper disabled");
        None
    };

    // ── Step 4: Build and start HTTP server ──────────────────────
    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let app = build_app(AppState::new(Arc::new(config), lock_manager));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {}: {}", addr, e)))?;

    tracing::info!("SeatHold server listening on {}", addr);

    // ── Step 5: Graceful shutdown ────────────────────────────────
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            tracing::info!("Shutdown signal received, starting graceful shutdown...");
            let _ = shutdown_tx.send(true);
        })
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    if let Some(handle) = sweeper_handle {
        let _ = tokio::time::timeout(grace, handle).await;
    }

    tracing::info!("SeatHold server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
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
}
