//! Convenience result type alias for SeatHold.

use crate::error::AppError;

/// A specialized `Result` type for SeatHold operations.
pub type AppResult<T> = Result<T, AppError>;
