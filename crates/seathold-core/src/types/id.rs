//! Newtype wrappers for the identifiers handled by the seat-hold service.
//!
//! Identifiers are opaque strings. The shared document they come from is
//! edited by other tools, which store seat and room ids as either JSON
//! strings or JSON numbers, so every id deserializes from both and compares
//! by its string form (`5` and `"5"` name the same seat).

use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Macro to define an identifier newtype.
///
/// The string form is the identity used for equality, hashing and ordering.
/// An id read from a JSON number also remembers that number so it is written
/// back the way it was found.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        pub struct $name {
            key: String,
            number: Option<serde_json::Number>,
        }

        impl $name {
            /// Create an identifier from anything string-like.
            pub fn new(value: impl Into<String>) -> Self {
                Self {
                    key: value.into(),
                    number: None,
                }
            }

            /// Return the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.key
            }

            /// Return the string form, dropping any numeric JSON form.
            pub fn into_inner(self) -> String {
                self.key
            }

            /// Whether the identifier was read from a JSON number.
            pub fn is_numeric(&self) -> bool {
                self.number.is_some()
            }

            /// Whether the identifier is empty or whitespace only.
            pub fn is_blank(&self) -> bool {
                self.key.trim().is_empty()
            }
        }

        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                self.key == other.key
            }
        }

        impl Eq for $name {}

        impl std::hash::Hash for $name {
            fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
                self.key.hash(state);
            }
        }

        impl PartialOrd for $name {
            fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
                Some(self.cmp(other))
            }
        }

        impl Ord for $name {
            fn cmp(&self, other: &Self) -> std::cmp::Ordering {
                self.key.cmp(&other.key)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.key)
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self::new(value)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::new(value)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.key
            }
        }

        impl Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: Serializer,
            {
                match &self.number {
                    Some(number) => number.serialize(serializer),
                    None => serializer.serialize_str(&self.key),
                }
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                let (key, number) = deserializer.deserialize_any(LooseIdVisitor)?;
                Ok(Self { key, number })
            }
        }
    };
}

/// Accepts a JSON string or number; yields the string form and, for
/// numbers, the number itself.
struct LooseIdVisitor;

impl<'de> Visitor<'de> for LooseIdVisitor {
    type Value = (String, Option<serde_json::Number>);

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string or numeric identifier")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok((v.to_string(), None))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
        Ok((v, None))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok((v.to_string(), Some(v.into())))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok((v.to_string(), Some(v.into())))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        let key = if v.fract() == 0.0 && v.is_finite() {
            format!("{}", v as i64)
        } else {
            v.to_string()
        };
        Ok((key, serde_json::Number::from_f64(v)))
    }
}

define_id!(
    /// Identifier of a seat.
    SeatId
);

define_id!(
    /// Identifier of the room a seat belongs to.
    RoomId
);

define_id!(
    /// Identifier of a lease holder (user, session, kiosk...).
    OwnerId
);
