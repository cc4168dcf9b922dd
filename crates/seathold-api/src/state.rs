//! Application state shared across all handlers and middleware.

use std::sync::Arc;
use std::time::Instant;

use seathold_core::config::AppConfig;
use seathold_lock::LockManager;
use seathold_storage::DocumentGateway;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Seat lease state machine
    pub lock_manager: Arc<LockManager>,
    /// When the process started serving
    pub started_at: Instant,
}

impl AppState {
    /// Build state around an already-wired lock manager.
    pub fn new(config: Arc<AppConfig>, lock_manager: Arc<LockManager>) -> Self {
        Self {
            config,
            lock_manager,
            started_at: Instant::now(),
        }
    }

    /// The persistence gateway behind the seat store.
    pub fn gateway(&self) -> &Arc<dyn DocumentGateway> {
        self.lock_manager.store().gateway()
    }
}
