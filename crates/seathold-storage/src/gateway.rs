//! Document gateway trait.

use async_trait::async_trait;

use seathold_core::result::AppResult;
use seathold_entity::SeatDocument;

/// Whole-document load/save of the seat collection.
///
/// Implementations must not assume callers coordinate with one another
/// beyond the guarantees of a single `save`: the caller holds the only
/// writer lock in this process, and a `save` either replaces the stored
/// document entirely or fails leaving the previous one in place.
#[async_trait]
pub trait DocumentGateway: Send + Sync + std::fmt::Debug + 'static {
    /// Return the provider type name (e.g., "json_file", "memory").
    fn provider_type(&self) -> &str;

    /// Check whether the backing store is reachable.
    async fn health_check(&self) -> AppResult<bool>;

    /// Load the full document.
    async fn load(&self) -> AppResult<SeatDocument>;

    /// Replace the stored document with `document`.
    async fn save(&self, document: &SeatDocument) -> AppResult<()>;
}
