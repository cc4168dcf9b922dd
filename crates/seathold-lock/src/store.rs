//! Seat records held in memory and written through to a document gateway.

use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};
use tracing::info;

use seathold_core::result::AppResult;
use seathold_core::types::SeatId;
use seathold_entity::{Seat, SeatDocument};
use seathold_storage::DocumentGateway;

/// In-memory seat document guarded by a single store-wide mutex.
///
/// The document is loaded once when the store is opened. Every mutation
/// goes through a [`SeatWriteGuard`], which holds the mutex while the caller
/// evaluates lease state and while the new document is persisted, so no two
/// writers can act on the same observed state.
#[derive(Debug)]
pub struct SeatStore {
    /// Where the document is persisted.
    gateway: Arc<dyn DocumentGateway>,
    /// The committed document.
    document: Mutex<SeatDocument>,
}

impl SeatStore {
    /// Load the document from `gateway` and build a store around it.
    pub async fn open(gateway: Arc<dyn DocumentGateway>) -> AppResult<Self> {
        let document = gateway.load().await?;
        info!(
            provider = gateway.provider_type(),
            seats = document.seats.len(),
            "Seat store loaded"
        );

        Ok(Self {
            gateway,
            document: Mutex::new(document),
        })
    }

    /// The gateway backing this store.
    pub fn gateway(&self) -> &Arc<dyn DocumentGateway> {
        &self.gateway
    }

    /// A copy of every committed seat record, in stored order.
    pub async fn seats(&self) -> Vec<Seat> {
        self.document.lock().await.seats.clone()
    }

    /// Take the store-wide writer lock.
    pub async fn write(&self) -> SeatWriteGuard<'_> {
        SeatWriteGuard {
            gateway: &self.gateway,
            document: self.document.lock().await,
        }
    }
}

/// Exclusive access to the seat document for one read-modify-write cycle.
///
/// Changes are staged on a copy and only replace the in-memory document
/// after the gateway accepted them; a failed save leaves memory as it was.
pub struct SeatWriteGuard<'a> {
    gateway: &'a Arc<dyn DocumentGateway>,
    document: MutexGuard<'a, SeatDocument>,
}

impl SeatWriteGuard<'_> {
    /// The committed record for `id`, if any.
    pub fn seat(&self, id: &SeatId) -> Option<&Seat> {
        self.document.find(id)
    }

    /// All committed records.
    pub fn seats(&self) -> &[Seat] {
        &self.document.seats
    }

    /// Insert or replace `seat`, persist, then commit.
    pub async fn upsert(&mut self, seat: Seat) -> AppResult<()> {
        let mut next = self.document.clone();
        match next.seats.iter_mut().find(|s| s.id == seat.id) {
            Some(existing) => *existing = seat,
            None => next.seats.push(seat),
        }
        self.persist(next).await
    }

    /// Persist `next` as the whole document, then commit it.
    pub async fn persist(&mut self, next: SeatDocument) -> AppResult<()> {
        self.gateway.save(&next).await?;
        *self.document = next;
        Ok(())
    }

    /// A staging copy of the committed document.
    pub fn draft(&self) -> SeatDocument {
        self.document.clone()
    }
}
