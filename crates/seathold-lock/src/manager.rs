//! Seat lease state machine.
//!
//! Per seat: `Unlocked` or `Locked(owner, expiry)`. Expiry is passive and
//! observed whenever a read or write touches the seat; every path evaluates
//! it through [`Seat::lease_state`].

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use seathold_core::config::LeaseConfig;
use seathold_core::traits::Clock;
use seathold_core::types::{OwnerId, RoomId, SeatId};
use seathold_entity::{LeaseState, Seat};

use crate::error::LeaseError;
use crate::store::SeatStore;

/// Filters for [`LockManager::query`]. Empty filters match everything.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeatFilter {
    /// Only seats in this room.
    pub room_id: Option<RoomId>,
    /// Only the seat with this id.
    pub id: Option<SeatId>,
}

impl SeatFilter {
    fn matches(&self, seat: &Seat) -> bool {
        self.room_id.as_ref().is_none_or(|room| seat.in_room(room))
            && self.id.as_ref().is_none_or(|id| &seat.id == id)
    }
}

/// Counts reported by the health endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatStats {
    /// Number of seat records.
    pub total: usize,
    /// Seats with an active lease.
    pub held: usize,
}

/// Arbitrates exclusive, time-limited holds on seats.
#[derive(Debug, Clone)]
pub struct LockManager {
    /// Seat records.
    store: Arc<SeatStore>,
    /// Time source for lease evaluation.
    clock: Arc<dyn Clock>,
    /// TTL defaults and bounds.
    policy: LeaseConfig,
}

impl LockManager {
    /// Creates a new lock manager.
    pub fn new(store: Arc<SeatStore>, clock: Arc<dyn Clock>, policy: LeaseConfig) -> Self {
        Self {
            store,
            clock,
            policy,
        }
    }

    /// The underlying seat store.
    pub fn store(&self) -> &Arc<SeatStore> {
        &self.store
    }

    /// Grant `owner` a lease on `seat_id`, creating the seat if needed.
    ///
    /// Re-acquiring a seat already held by `owner` restarts the lease.
    pub async fn acquire(
        &self,
        seat_id: &SeatId,
        room_id: Option<RoomId>,
        owner: &OwnerId,
        ttl_seconds: Option<u64>,
    ) -> Result<Seat, LeaseError> {
        require(seat_id.is_blank(), "seatId")?;
        require(owner.is_blank(), "userId")?;
        let ttl = self.policy.effective_ttl(ttl_seconds);

        let mut guard = self.store.write().await;
        let now = self.clock.now();

        let mut seat = match guard.seat(seat_id) {
            Some(existing) => {
                if let LeaseState::Held { owner: holder, .. } = existing.lease_state(now) {
                    if &holder != owner {
                        let remaining_seconds = existing.remaining_seconds(now);
                        debug!(
                            seat_id = %seat_id,
                            owner = %owner,
                            holder = %holder,
                            remaining_seconds,
                            "Seat acquire rejected"
                        );
                        return Err(LeaseError::Held {
                            holder,
                            remaining_seconds,
                        });
                    }
                }
                existing.clone()
            }
            None => Seat::new(seat_id.clone(), None),
        };

        seat.grant(owner.clone(), room_id, now, ttl);
        guard.upsert(seat.clone()).await?;

        info!(
            seat_id = %seat_id,
            owner = %owner,
            ttl_seconds = ttl,
            hold_until = ?seat.hold_until,
            "Seat locked"
        );
        Ok(seat)
    }

    /// Extend `owner`'s active lease on `seat_id` to `now + ttl`.
    pub async fn refresh(
        &self,
        seat_id: &SeatId,
        owner: &OwnerId,
        ttl_seconds: Option<u64>,
    ) -> Result<Seat, LeaseError> {
        require(seat_id.is_blank(), "seatId")?;
        require(owner.is_blank(), "userId")?;
        let ttl = self.policy.effective_ttl(ttl_seconds);

        let mut guard = self.store.write().await;
        let now = self.clock.now();

        let existing = guard.seat(seat_id).ok_or(LeaseError::NotLocked)?;
        match existing.lease_state(now) {
            LeaseState::Free => return Err(LeaseError::NotLocked),
            LeaseState::Expired { owner: holder } => {
                return Err(LeaseError::Expired { holder });
            }
            LeaseState::Held { owner: holder, .. } if &holder != owner => {
                return Err(LeaseError::NotOwner {
                    remaining_seconds: existing.remaining_seconds(now),
                    holder,
                });
            }
            LeaseState::Held { .. } => {}
        }

        let mut seat = existing.clone();
        seat.extend(now, ttl);
        guard.upsert(seat.clone()).await?;

        debug!(
            seat_id = %seat_id,
            owner = %owner,
            ttl_seconds = ttl,
            hold_until = ?seat.hold_until,
            "Seat lease refreshed"
        );
        Ok(seat)
    }

    /// Drop the lease on `seat_id`.
    ///
    /// Unknown seats, free seats, lapsed leases, and leases held by `owner`
    /// all release successfully; only an active lease held by someone else
    /// is refused.
    pub async fn release(&self, seat_id: &SeatId, owner: &OwnerId) -> Result<(), LeaseError> {
        require(seat_id.is_blank(), "seatId")?;
        require(owner.is_blank(), "userId")?;

        let mut guard = self.store.write().await;
        let now = self.clock.now();

        let Some(existing) = guard.seat(seat_id) else {
            debug!(seat_id = %seat_id, owner = %owner, "Release of unknown seat ignored");
            return Ok(());
        };

        if let LeaseState::Held { owner: holder, .. } = existing.lease_state(now) {
            if &holder != owner {
                warn!(
                    seat_id = %seat_id,
                    owner = %owner,
                    holder = %holder,
                    "Attempted to release a seat held by another owner"
                );
                return Err(LeaseError::ForeignRelease {
                    remaining_seconds: existing.remaining_seconds(now),
                    holder,
                });
            }
        }

        let mut seat = existing.clone();
        seat.clear_lease();
        guard.upsert(seat).await?;

        info!(seat_id = %seat_id, owner = %owner, "Seat unlocked");
        Ok(())
    }

    /// Seats matching `filter`, with lapsed leases presented as free.
    ///
    /// The projection is not written back; the next write touching a seat
    /// (or the sweeper) persists it.
    pub async fn query(&self, filter: &SeatFilter) -> Vec<Seat> {
        let seats = self.store.seats().await;
        let now = self.clock.now();

        seats
            .iter()
            .filter(|seat| filter.matches(seat))
            .map(|seat| seat.projected(now))
            .collect()
    }

    /// Persist every lapsed lease as free. Returns how many seats changed.
    pub async fn sweep_expired(&self) -> Result<usize, LeaseError> {
        let mut guard = self.store.write().await;
        let now = self.clock.now();

        let mut next = guard.draft();
        let changed = next
            .seats
            .iter_mut()
            .map(|seat| seat.normalize(now))
            .filter(|changed| *changed)
            .count();

        if changed > 0 {
            guard.persist(next).await?;
            info!(count = changed, "Expired seat leases cleared");
        }

        Ok(changed)
    }

    /// Seat and active-lease counts.
    pub async fn stats(&self) -> SeatStats {
        let seats = self.store.seats().await;
        let now = self.clock.now();

        SeatStats {
            total: seats.len(),
            held: seats.iter().filter(|s| s.is_actively_locked(now)).count(),
        }
    }
}

fn require(blank: bool, field: &'static str) -> Result<(), LeaseError> {
    if blank {
        Err(LeaseError::MissingField { field })
    } else {
        Ok(())
    }
}
