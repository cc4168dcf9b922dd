//! Lease operation outcomes.

use serde_json::json;
use thiserror::Error;

use seathold_core::error::AppError;
use seathold_core::types::OwnerId;

/// Why a lease operation did not go through.
#[derive(Debug, Error)]
pub enum LeaseError {
    /// A required identifier was missing or blank.
    #[error("{field} is required")]
    MissingField {
        /// Name of the request field.
        field: &'static str,
    },

    /// Acquire: another owner holds an active lease.
    #[error("Seat already locked")]
    Held {
        /// Current holder.
        holder: OwnerId,
        /// Whole seconds until the lease lapses.
        remaining_seconds: u64,
    },

    /// Refresh: the seat does not exist or carries no lease.
    #[error("Seat is not locked")]
    NotLocked,

    /// Refresh: the lease lapsed before it was refreshed.
    #[error("Lock expired")]
    Expired {
        /// The holder whose lease lapsed.
        holder: OwnerId,
    },

    /// Refresh: someone else holds the active lease.
    #[error("Not lock owner")]
    NotOwner {
        /// Current holder.
        holder: OwnerId,
        /// Whole seconds until the lease lapses.
        remaining_seconds: u64,
    },

    /// Release: someone else holds the active lease.
    #[error("Cannot unlock another owner's lock")]
    ForeignRelease {
        /// Current holder.
        holder: OwnerId,
        /// Whole seconds until the lease lapses.
        remaining_seconds: u64,
    },

    /// The store could not persist the change.
    #[error(transparent)]
    Store(#[from] AppError),
}

impl From<LeaseError> for AppError {
    fn from(err: LeaseError) -> Self {
        let message = err.to_string();
        match err {
            LeaseError::MissingField { field } => {
                AppError::validation(message).with_details(json!({ "field": field }))
            }
            LeaseError::Held {
                holder,
                remaining_seconds,
            } => AppError::conflict(message).with_details(json!({
                "reason": "held",
                "holder": holder,
                "remaining_seconds": remaining_seconds,
            })),
            LeaseError::NotLocked => {
                AppError::conflict(message).with_details(json!({ "reason": "not_locked" }))
            }
            LeaseError::Expired { holder } => AppError::conflict(message).with_details(json!({
                "reason": "expired",
                "holder": holder,
            })),
            LeaseError::NotOwner {
                holder,
                remaining_seconds,
            } => AppError::conflict(message).with_details(json!({
                "reason": "not_owner",
                "holder": holder,
                "remaining_seconds": remaining_seconds,
            })),
            LeaseError::ForeignRelease {
                holder,
                remaining_seconds,
            } => AppError::forbidden(message).with_details(json!({
                "reason": "not_owner",
                "holder": holder,
                "remaining_seconds": remaining_seconds,
            })),
            LeaseError::Store(inner) => inner,
        }
    }
}
