//! Response DTOs.

use serde::{Deserialize, Serialize};

/// Body of a successful unlock.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct OkResponse {
    /// Always `true`.
    pub ok: bool,
}

impl OkResponse {
    /// The one successful value.
    pub const fn ok() -> Self {
        Self { ok: true }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// Service answered.
    pub ok: bool,
    /// Crate version.
    pub version: String,
    /// Seconds since the process started serving.
    pub uptime: f64,
    /// Persistence gateway status.
    pub store: StoreHealth,
    /// Seat counts.
    pub seats: SeatCounts,
}

/// Persistence gateway status.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreHealth {
    /// Gateway provider type.
    pub provider: String,
    /// Whether the gateway answered its health check.
    pub reachable: bool,
}

/// Seat counts reported by the health check.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatCounts {
    /// Seat records.
    pub total: usize,
    /// Seats with an active lease.
    pub held: usize,
}
