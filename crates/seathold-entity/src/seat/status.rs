//! Advisory seat status label.

use serde::{Deserialize, Serialize};

/// Advisory lock label stored alongside a seat.
///
/// Never authoritative: lock state is always derived from `lockedBy` and
/// `holdUntil`. Labels written by other tools are carried through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SeatStatus {
    /// A lease was granted.
    Locked,
    /// No lease is held.
    Free,
    /// Any other label found in the document.
    Other(String),
}

impl SeatStatus {
    /// Return the label as stored.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Locked => "locked",
            Self::Free => "free",
            Self::Other(label) => label,
        }
    }
}

impl From<String> for SeatStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "locked" => Self::Locked,
            "free" => Self::Free,
            _ => Self::Other(value),
        }
    }
}

impl From<SeatStatus> for String {
    fn from(value: SeatStatus) -> Self {
        match value {
            SeatStatus::Other(label) => label,
            other => other.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for SeatStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
