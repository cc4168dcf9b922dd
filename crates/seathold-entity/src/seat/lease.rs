//! Lease evaluation shared by every read and write path.
//!
//! A seat is actively locked iff it has a holder AND its `hold_until` is
//! strictly after `now`. The stored `status` label is never consulted.

use chrono::{DateTime, Utc};

use seathold_core::types::OwnerId;

use super::model::Seat;
use super::status::SeatStatus;

/// Lease state of a seat at a given instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeaseState {
    /// No holder is recorded.
    Free,
    /// A holder is recorded but the lease has lapsed (or has no expiry).
    Expired {
        /// The stale holder.
        owner: OwnerId,
    },
    /// The lease is active.
    Held {
        /// Current holder.
        owner: OwnerId,
        /// Absolute expiry.
        hold_until: DateTime<Utc>,
    },
}

impl LeaseState {
    /// Whether the lease is active.
    pub fn is_held(&self) -> bool {
        matches!(self, Self::Held { .. })
    }
}

impl Seat {
    /// Evaluate the lease at `now`.
    pub fn lease_state(&self, now: DateTime<Utc>) -> LeaseState {
        match (&self.locked_by, self.hold_until) {
            (None, _) => LeaseState::Free,
            (Some(owner), Some(hold_until)) if hold_until > now => LeaseState::Held {
                owner: owner.clone(),
                hold_until,
            },
            (Some(owner), _) => LeaseState::Expired {
                owner: owner.clone(),
            },
        }
    }

    /// Whether the seat is actively locked at `now`.
    pub fn is_actively_locked(&self, now: DateTime<Utc>) -> bool {
        self.lease_state(now).is_held()
    }

    /// Whole seconds left on the lease, rounded down; `0` when not held.
    pub fn remaining_seconds(&self, now: DateTime<Utc>) -> u64 {
        match self.lease_state(now) {
            LeaseState::Held { hold_until, .. } => {
                u64::try_from((hold_until - now).num_seconds()).unwrap_or(0)
            }
            _ => 0,
        }
    }

    /// Whether the record still carries lease fields (or a `locked` label)
    /// that no longer describe an active lease.
    pub fn has_stale_lease(&self, now: DateTime<Utc>) -> bool {
        !self.is_actively_locked(now)
            && (self.locked_by.is_some()
                || self.hold_until.is_some()
                || self.status == Some(SeatStatus::Locked))
    }

    /// Clear stale lease fields in place. Returns whether anything changed.
    pub fn normalize(&mut self, now: DateTime<Utc>) -> bool {
        if self.has_stale_lease(now) {
            self.clear_lease();
            true
        } else {
            false
        }
    }

    /// The record as it should be presented at `now`: stale leases are
    /// shown as free.
    pub fn projected(&self, now: DateTime<Utc>) -> Seat {
        let mut view = self.clone();
        view.normalize(now);
        view
    }
}
