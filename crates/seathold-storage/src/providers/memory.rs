//! In-memory document gateway.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use seathold_core::result::AppResult;
use seathold_entity::SeatDocument;

use crate::gateway::DocumentGateway;

/// Keeps the document in process memory. Nothing survives a restart.
#[derive(Debug, Clone, Default)]
pub struct MemoryGateway {
    /// The stored document.
    document: Arc<RwLock<SeatDocument>>,
    /// Number of successful saves.
    saves: Arc<AtomicU64>,
}

impl MemoryGateway {
    /// Create an empty in-memory gateway.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a gateway pre-seeded with `document`.
    pub fn with_document(document: SeatDocument) -> Self {
        Self {
            document: Arc::new(RwLock::new(document)),
            saves: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Number of saves performed since creation.
    pub fn save_count(&self) -> u64 {
        self.saves.load(Ordering::SeqCst)
    }

    /// A copy of the stored document.
    pub async fn snapshot(&self) -> SeatDocument {
        self.document.read().await.clone()
    }
}

#[async_trait]
impl DocumentGateway for MemoryGateway {
    fn provider_type(&self) -> &str {
        "memory"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }

    async fn load(&self) -> AppResult<SeatDocument> {
        Ok(self.document.read().await.clone())
    }

    async fn save(&self, document: &SeatDocument) -> AppResult<()> {
        *self.document.write().await = document.clone();
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
