//! Request DTOs with validation.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use validator::{Validate, ValidationError};

use seathold_core::types::{OwnerId, RoomId, SeatId};

/// Lock request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LockSeatRequest {
    /// Seat to lock.
    #[validate(
        required(message = "seatId is required"),
        custom(function = "not_blank", message = "seatId is required")
    )]
    pub seat_id: Option<SeatId>,
    /// Room the seat belongs to.
    #[serde(default)]
    pub room_id: Option<RoomId>,
    /// Requesting owner.
    #[serde(alias = "ownerId")]
    #[validate(
        required(message = "userId is required"),
        custom(function = "not_blank", message = "userId is required")
    )]
    pub user_id: Option<OwnerId>,
    /// Requested lease length.
    #[serde(default, deserialize_with = "loose_seconds")]
    pub ttl_seconds: Option<u64>,
}

/// Refresh request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RefreshSeatRequest {
    /// Seat whose lease is extended.
    #[validate(
        required(message = "seatId is required"),
        custom(function = "not_blank", message = "seatId is required")
    )]
    pub seat_id: Option<SeatId>,
    /// Lease holder.
    #[serde(alias = "ownerId")]
    #[validate(
        required(message = "userId is required"),
        custom(function = "not_blank", message = "userId is required")
    )]
    pub user_id: Option<OwnerId>,
    /// Requested lease length.
    #[serde(default, deserialize_with = "loose_seconds")]
    pub ttl_seconds: Option<u64>,
}

/// Unlock request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UnlockSeatRequest {
    /// Seat to release.
    #[validate(
        required(message = "seatId is required"),
        custom(function = "not_blank", message = "seatId is required")
    )]
    pub seat_id: Option<SeatId>,
    /// Releasing owner.
    #[serde(alias = "ownerId")]
    #[validate(
        required(message = "userId is required"),
        custom(function = "not_blank", message = "userId is required")
    )]
    pub user_id: Option<OwnerId>,
}

fn not_blank<T: AsRef<str>>(value: &T) -> Result<(), ValidationError> {
    if value.as_ref().trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Accepts `30`, `30.7`, `"30"`, `null`, or an empty string.
///
/// Missing, zero, or unparseable values take the configured default.
/// Negative values become `Some(0)` so the lease floor applies. Fractions
/// are truncated.
fn loose_seconds<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    struct SecondsVisitor;

    fn whole_seconds(v: f64) -> Option<u64> {
        if !v.is_finite() {
            None
        } else if v < 1.0 {
            Some(0)
        } else {
            Some(v.trunc() as u64)
        }
    }

    impl<'de> Visitor<'de> for SecondsVisitor {
        type Value = Option<u64>;

        fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            f.write_str("a number of seconds")
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
            Ok((v > 0).then_some(v))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
            Ok((v != 0).then(|| u64::try_from(v).unwrap_or(0)))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
            Ok(if v == 0.0 { None } else { whole_seconds(v) })
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            Ok(v.trim().parse::<f64>().ok().and_then(whole_seconds))
        }

        fn visit_bool<E: de::Error>(self, _v: bool) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<Self::Value, D::Error> {
            d.deserialize_any(SecondsVisitor)
        }
    }

    deserializer.deserialize_any(SecondsVisitor)
}
