//! Seat lock handlers.

use axum::Json;
use axum::extract::{Query, State};

use seathold_core::error::AppError;
use seathold_entity::Seat;

use crate::dto::request::{LockSeatRequest, RefreshSeatRequest, UnlockSeatRequest};
use crate::dto::response::OkResponse;
use crate::error::ApiResult;
use crate::extractors::{SeatQueryParams, ValidatedJson};
use crate::state::AppState;

/// GET /seats
pub async fn list_seats(
    State(state): State<AppState>,
    Query(params): Query<SeatQueryParams>,
) -> Json<Vec<Seat>> {
    let seats = state.lock_manager.query(&params.into_filter()).await;
    Json(seats)
}

/// POST /seats/lock
pub async fn lock_seat(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<LockSeatRequest>,
) -> ApiResult<Json<Seat>> {
    let seat_id = req.seat_id.ok_or_else(|| missing("seatId"))?;
    let owner = req.user_id.ok_or_else(|| missing("userId"))?;

    let seat = state
        .lock_manager
        .acquire(&seat_id, req.room_id, &owner, req.ttl_seconds)
        .await?;
    Ok(Json(seat))
}

/// POST /seats/refresh
pub async fn refresh_seat(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RefreshSeatRequest>,
) -> ApiResult<Json<Seat>> {
    let seat_id = req.seat_id.ok_or_else(|| missing("seatId"))?;
    let owner = req.user_id.ok_or_else(|| missing("userId"))?;

    let seat = state
        .lock_manager
        .refresh(&seat_id, &owner, req.ttl_seconds)
        .await?;
    Ok(Json(seat))
}

/// POST /seats/unlock
pub async fn unlock_seat(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<UnlockSeatRequest>,
) -> ApiResult<Json<OkResponse>> {
    let seat_id = req.seat_id.ok_or_else(|| missing("seatId"))?;
    let owner = req.user_id.ok_or_else(|| missing("userId"))?;

    state.lock_manager.release(&seat_id, &owner).await?;
    Ok(Json(OkResponse::ok()))
}

fn missing(field: &str) -> AppError {
    AppError::validation(format!("{field} is required"))
}
