//! The persisted document holding the seat collection.

use serde::{Deserialize, Deserializer, Serialize};

use seathold_core::types::SeatId;

use crate::seat::Seat;

/// Whole persisted document.
///
/// Seats live under the `seats` key. Every other top-level key belongs to
/// other services sharing the file (buildings, rooms, reservations, ...)
/// and is preserved verbatim on save.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeatDocument {
    /// The seat collection, in stored order.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub seats: Vec<Seat>,
    /// Collections owned by other services.
    #[serde(flatten)]
    pub other: serde_json::Map<String, serde_json::Value>,
}

impl SeatDocument {
    /// Create a document containing only `seats`.
    pub fn with_seats(seats: Vec<Seat>) -> Self {
        Self {
            seats,
            other: serde_json::Map::new(),
        }
    }

    /// Find a seat by identifier.
    pub fn find(&self, id: &SeatId) -> Option<&Seat> {
        self.seats.iter().find(|seat| &seat.id == id)
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Seat>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Seat>>::deserialize(deserializer)?.unwrap_or_default())
}
