//! Seat entity model.

use std::fmt;

use chrono::serde::ts_milliseconds_option;
use chrono::{DateTime, Duration, Utc};
use serde::de::{self, DeserializeOwned, Error as _, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use seathold_core::types::{OwnerId, RoomId, SeatId};

use super::status::SeatStatus;

const ID: &str = "id";
const ROOM_ID: &str = "roomId";
const LOCKED_BY: &str = "lockedBy";
const LOCKED_AT: &str = "lockedAt";
const HOLD_UNTIL: &str = "holdUntil";
const STATUS: &str = "status";

/// A seat and its current lease.
///
/// Timestamps are stored as Unix epoch milliseconds. Fields this service
/// does not own (labels, row numbers, ...) are kept in `extra` and written
/// back untouched.
///
/// A record written back without changes serializes exactly as it was read:
/// keys keep their order, ids keep their JSON type, and optional keys that
/// were absent stay absent. Lease fields cleared by a release are written as
/// `null`.
#[derive(Debug, Clone, PartialEq)]
pub struct Seat {
    /// Stable seat identifier.
    pub id: SeatId,
    /// Room the seat belongs to. Not validated against any room registry.
    pub room_id: Option<RoomId>,
    /// Current (or stale) lease holder.
    pub locked_by: Option<OwnerId>,
    /// When the lease was last granted.
    pub locked_at: Option<DateTime<Utc>>,
    /// Absolute expiry of the current lease.
    pub hold_until: Option<DateTime<Utc>>,
    /// Advisory label; may lag behind `hold_until`.
    pub status: Option<SeatStatus>,
    /// Fields owned by other tools.
    pub extra: Map<String, Value>,
    /// Keys written even when empty.
    present: Present,
    /// Key order as read.
    layout: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Present {
    room_id: bool,
    locked_by: bool,
    locked_at: bool,
    hold_until: bool,
    status: bool,
}

impl Seat {
    /// Create an unleased seat record.
    pub fn new(id: SeatId, room_id: Option<RoomId>) -> Self {
        Self {
            id,
            room_id,
            locked_by: None,
            locked_at: None,
            hold_until: None,
            status: None,
            extra: Map::new(),
            present: Present::default(),
            layout: Vec::new(),
        }
    }

    /// Grant (or re-grant) the lease to `owner` for `ttl_seconds` from `now`.
    ///
    /// `room_id` replaces the stored room only when provided. The holder is
    /// always stored in string form.
    pub fn grant(
        &mut self,
        owner: OwnerId,
        room_id: Option<RoomId>,
        now: DateTime<Utc>,
        ttl_seconds: u64,
    ) {
        if room_id.is_some() {
            self.room_id = room_id;
        }
        self.locked_by = Some(OwnerId::new(owner.into_inner()));
        self.locked_at = Some(now);
        self.hold_until = Some(now + ttl_duration(ttl_seconds));
        self.status = Some(SeatStatus::Locked);
        self.mark_lease_written();
    }

    /// Push the expiry to `now + ttl_seconds`, keeping `locked_at`.
    pub fn extend(&mut self, now: DateTime<Utc>, ttl_seconds: u64) {
        self.hold_until = Some(now + ttl_duration(ttl_seconds));
        self.status = Some(SeatStatus::Locked);
        self.mark_lease_written();
    }

    /// Drop the lease. `locked_at` is kept as history.
    pub fn clear_lease(&mut self) {
        self.locked_by = None;
        self.hold_until = None;
        self.status = Some(SeatStatus::Free);
        self.mark_lease_written();
    }

    /// Whether the record belongs to `room`.
    pub fn in_room(&self, room: &RoomId) -> bool {
        self.room_id.as_ref() == Some(room)
    }

    pub(crate) fn mark_lease_written(&mut self) {
        self.present.locked_by = true;
        self.present.hold_until = true;
        self.present.status = true;
        if self.locked_at.is_some() {
            self.present.locked_at = true;
        }
    }

    fn write_known<M: SerializeMap>(&self, key: &str, map: &mut M) -> Result<(), M::Error> {
        let millis = |t: &Option<DateTime<Utc>>| t.map(|t| t.timestamp_millis());
        match key {
            ID => map.serialize_entry(ID, &self.id),
            ROOM_ID if self.room_id.is_some() || self.present.room_id => {
                map.serialize_entry(ROOM_ID, &self.room_id)
            }
            LOCKED_BY if self.locked_by.is_some() || self.present.locked_by => {
                map.serialize_entry(LOCKED_BY, &self.locked_by)
            }
            LOCKED_AT if self.locked_at.is_some() || self.present.locked_at => {
                map.serialize_entry(LOCKED_AT, &millis(&self.locked_at))
            }
            HOLD_UNTIL if self.hold_until.is_some() || self.present.hold_until => {
                map.serialize_entry(HOLD_UNTIL, &millis(&self.hold_until))
            }
            STATUS if self.status.is_some() || self.present.status => {
                map.serialize_entry(STATUS, &self.status)
            }
            _ => Ok(()),
        }
    }
}

fn is_known(key: &str) -> bool {
    matches!(key, ID | ROOM_ID | LOCKED_BY | LOCKED_AT | HOLD_UNTIL | STATUS)
}

impl Serialize for Seat {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(None)?;

        for key in &self.layout {
            if is_known(key) {
                self.write_known(key, &mut map)?;
            } else if let Some(value) = self.extra.get(key) {
                map.serialize_entry(key, value)?;
            }
        }

        for key in [ID, ROOM_ID, LOCKED_BY, LOCKED_AT, HOLD_UNTIL, STATUS] {
            if !self.layout.iter().any(|k| k == key) {
                self.write_known(key, &mut map)?;
            }
        }

        for (key, value) in &self.extra {
            if !self.layout.contains(key) {
                map.serialize_entry(key, value)?;
            }
        }

        map.end()
    }
}

impl<'de> Deserialize<'de> for Seat {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(SeatVisitor)
    }
}

struct SeatVisitor;

impl<'de> Visitor<'de> for SeatVisitor {
    type Value = Seat;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a seat object")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Seat, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut fields = Map::new();
        let mut layout = Vec::new();
        while let Some((key, value)) = access.next_entry::<String, Value>()? {
            if fields.insert(key.clone(), value).is_none() {
                layout.push(key);
            }
        }

        let mut present = Present::default();
        let id = match fields.remove(ID) {
            Some(value) => SeatId::deserialize(value).map_err(A::Error::custom)?,
            None => return Err(A::Error::missing_field(ID)),
        };
        let room_id: Option<RoomId> =
            take::<_, A::Error>(&mut fields, ROOM_ID, &mut present.room_id)?;
        let locked_by: Option<OwnerId> =
            take::<_, A::Error>(&mut fields, LOCKED_BY, &mut present.locked_by)?;
        let status: Option<SeatStatus> =
            take::<_, A::Error>(&mut fields, STATUS, &mut present.status)?;
        let locked_at = take_millis::<A::Error>(&mut fields, LOCKED_AT, &mut present.locked_at)?;
        let hold_until =
            take_millis::<A::Error>(&mut fields, HOLD_UNTIL, &mut present.hold_until)?;

        Ok(Seat {
            id,
            room_id,
            locked_by,
            locked_at,
            hold_until,
            status,
            extra: fields,
            present,
            layout,
        })
    }
}

fn take<T, E>(fields: &mut Map<String, Value>, key: &str, present: &mut bool) -> Result<Option<T>, E>
where
    T: DeserializeOwned,
    E: de::Error,
{
    match fields.remove(key) {
        Some(value) => {
            *present = true;
            Option::<T>::deserialize(value).map_err(|e| E::custom(format!("{key}: {e}")))
        }
        None => Ok(None),
    }
}

fn take_millis<E>(
    fields: &mut Map<String, Value>,
    key: &str,
    present: &mut bool,
) -> Result<Option<DateTime<Utc>>, E>
where
    E: de::Error,
{
    match fields.remove(key) {
        Some(value) => {
            *present = true;
            ts_milliseconds_option::deserialize(value)
                .map_err(|e| E::custom(format!("{key}: {e}")))
        }
        None => Ok(None),
    }
}

fn ttl_duration(ttl_seconds: u64) -> Duration {
    Duration::seconds(i64::try_from(ttl_seconds).unwrap_or(i64::MAX / 1_000))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserializes_shared_document_shape() {
        let json = serde_json::json!({
            "id": 5,
            "roomId": "r1",
            "lockedBy": "U1",
            "lockedAt": 1_700_000_000_000_i64,
            "holdUntil": 1_700_000_010_000_i64,
            "status": "locked",
            "label": "A5"
        });

        let seat: Seat = serde_json::from_value(json).expect("deserialize");
        assert_eq!(seat.id.as_str(), "5");
        assert_eq!(seat.room_id, Some(RoomId::new("r1")));
        assert_eq!(seat.locked_by, Some(OwnerId::new("U1")));
        assert_eq!(
            seat.hold_until.map(|t| t.timestamp_millis()),
            Some(1_700_000_010_000)
        );
        assert_eq!(seat.extra.get("label"), Some(&serde_json::json!("A5")));
    }

    #[test]
    fn test_null_lease_fields() {
        let json = serde_json::json!({
            "id": "7",
            "lockedBy": null,
            "holdUntil": null,
            "status": "free"
        });

        let seat: Seat = serde_json::from_value(json).expect("deserialize");
        assert!(seat.locked_by.is_none());
        assert!(seat.hold_until.is_none());
        assert_eq!(seat.status, Some(SeatStatus::Free));
    }

    #[test]
    fn test_serializes_millis_and_nulls() {
        let now = DateTime::from_timestamp_millis(1_700_000_000_000).expect("timestamp");
        let mut seat = Seat::new(SeatId::new("9"), None);
        seat.grant(OwnerId::new("U1"), None, now, 10);

        let value = serde_json::to_value(&seat).expect("serialize");
        assert_eq!(value["lockedAt"], serde_json::json!(1_700_000_000_000_i64));
        assert_eq!(value["holdUntil"], serde_json::json!(1_700_000_010_000_i64));
        assert!(value.get("roomId").is_none());

        seat.clear_lease();
        let value = serde_json::to_value(&seat).expect("serialize");
        assert!(value["lockedAt"].is_number());
        assert!(value["lockedBy"].is_null());
        assert!(value["holdUntil"].is_null());
        assert_eq!(value["status"], serde_json::json!("free"));
    }

    #[test]
    fn test_grant_keeps_room_when_absent() {
        let now = Utc::now();
        let mut seat = Seat::new(SeatId::new("1"), Some(RoomId::new("r1")));
        seat.grant(OwnerId::new("U1"), None, now, 30);
        assert_eq!(seat.room_id, Some(RoomId::new("r1")));

        seat.grant(OwnerId::new("U1"), Some(RoomId::new("r2")), now, 30);
        assert_eq!(seat.room_id, Some(RoomId::new("r2")));
    }

    #[test]
    fn test_untouched_record_serializes_as_read() {
        let raw = r#"{"label":"B2","id":2,"roomId":7,"status":"free"}"#;
        let seat: Seat = serde_json::from_str(raw).expect("deserialize");
        assert!(seat.id.is_numeric());
        assert_eq!(serde_json::to_string(&seat).expect("serialize"), raw);
    }

    #[test]
    fn test_lease_keys_appear_only_once_written() {
        let mut seat: Seat = serde_json::from_str(r#"{"id":3}"#).expect("deserialize");
        assert_eq!(serde_json::to_string(&seat).expect("serialize"), r#"{"id":3}"#);

        let now = DateTime::from_timestamp_millis(1_700_000_000_000).expect("timestamp");
        seat.grant(OwnerId::new("U1"), None, now, 10);
        seat.clear_lease();
        assert_eq!(
            serde_json::to_string(&seat).expect("serialize"),
            r#"{"id":3,"lockedBy":null,"lockedAt":1700000000000,"holdUntil":null,"status":"free"}"#
        );
    }

    #[test]
    fn test_missing_id_is_rejected() {
        assert!(serde_json::from_str::<Seat>(r#"{"roomId":"r1"}"#).is_err());
    }
}
