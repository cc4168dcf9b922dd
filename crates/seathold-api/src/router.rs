//! Route definitions for the SeatHold HTTP API.
//!
//! Paths are mounted at the root to stay compatible with existing seat
//! clients. The router receives `AppState` and passes it to all handlers via
//! Axum's `State` extractor.

use axum::{
    Router,
    routing::{get, post},
};

use crate::handlers;
use crate::state::AppState;

/// Build the Axum router with all routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(health_routes())
        .merge(seat_routes())
        .with_state(state)
}

/// Liveness and store status
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}

/// Seat listing and lease operations
fn seat_routes() -> Router<AppState> {
    Router::new()
        .route("/seats", get(handlers::seat::list_seats))
        .route("/seats/lock", post(handlers::seat::lock_seat))
        .route("/seats/refresh", post(handlers::seat::refresh_seat))
        .route("/seats/unlock", post(handlers::seat::unlock_seat))
}
