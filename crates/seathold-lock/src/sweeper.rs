//! Periodic persistence of lapsed leases.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time;

use crate::manager::LockManager;

/// Background task that clears expired leases in storage.
///
/// Lease correctness never depends on it; it only keeps the stored
/// document from showing stale holders to other readers of the file.
#[derive(Debug)]
pub struct LeaseSweeper {
    /// Lock manager reference
    manager: Arc<LockManager>,
    /// Sweep interval
    interval: Duration,
}

impl LeaseSweeper {
    /// Create a new sweeper
    pub fn new(manager: Arc<LockManager>, interval_seconds: u64) -> Self {
        Self {
            manager,
            interval: Duration::from_secs(interval_seconds.max(1)),
        }
    }

    /// Run the sweep loop until `cancel` flips to `true`
    pub async fn run(&self, mut cancel: watch::Receiver<bool>) {
        tracing::info!(
            "Lease sweeper started, interval={}s",
            self.interval.as_secs()
        );

        let mut interval = time::interval(self.interval);
        interval.set_missed_tick_behavior(time::MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    match self.manager.sweep_expired().await {
                        Ok(0) => tracing::trace!("No expired leases"),
                        Ok(n) => tracing::debug!("Swept {} expired leases", n),
                        Err(e) => tracing::error!("Lease sweep failed: {}", e),
                    }
                }
                changed = cancel.changed() => {
                    if changed.is_err() || *cancel.borrow() {
                        tracing::info!("Lease sweeper shutting down");
                        break;
                    }
                }
            }
        }
    }
}
