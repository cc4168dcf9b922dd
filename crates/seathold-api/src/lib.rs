//! # seathold-api
//!
//! HTTP API layer for SeatHold built on Axum.
//!
//! Provides the seat lock endpoints, health reporting, middleware (CORS,
//! request logging, tracing), extractors, DTOs, and error mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::build_app;
pub use state::AppState;
