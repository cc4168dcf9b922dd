//! Seat listing query parameter extractor.

use serde::{Deserialize, Serialize};

use seathold_core::types::{RoomId, SeatId};
use seathold_lock::SeatFilter;

/// Query parameters for `GET /seats`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatQueryParams {
    /// Restrict to one room.
    pub room_id: Option<String>,
    /// Restrict to one seat.
    pub id: Option<String>,
}

impl SeatQueryParams {
    /// Converts to a `SeatFilter`. Empty parameters do not filter.
    pub fn into_filter(self) -> SeatFilter {
        SeatFilter {
            room_id: non_empty(self.room_id).map(RoomId::new),
            id: non_empty(self.id).map(SeatId::new),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
