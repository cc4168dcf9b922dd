//! Health check handler.

use axum::Json;
use axum::extract::State;

use crate::dto::response::{HealthResponse, SeatCounts, StoreHealth};
use crate::state::AppState;

/// GET /health
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let gateway = state.gateway();
    let reachable = match gateway.health_check().await {
        Ok(ok) => ok,
        Err(e) => {
            tracing::warn!(error = %e, "Store health check failed");
            false
        }
    };
    let stats = state.lock_manager.stats().await;

    Json(HealthResponse {
        ok: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime: state.started_at.elapsed().as_secs_f64(),
        store: StoreHealth {
            provider: gateway.provider_type().to_string(),
            reachable,
        },
        seats: SeatCounts {
            total: stats.total,
            held: stats.held,
        },
    })
}
