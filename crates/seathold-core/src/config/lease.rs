//! Lease TTL policy configuration.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Seat lease TTL policy.
///
/// Requested TTLs are clamped into `[min_ttl_seconds, max_ttl_seconds]`;
/// a request without a TTL gets `default_ttl_seconds`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaseConfig {
    /// TTL applied when a request does not specify one.
    #[serde(default = "default_ttl")]
    pub default_ttl_seconds: u64,
    /// Floor for any requested TTL.
    #[serde(default = "default_min_ttl")]
    pub min_ttl_seconds: u64,
    /// Ceiling for any requested TTL.
    #[serde(default = "default_max_ttl")]
    pub max_ttl_seconds: u64,
    /// Interval of the background sweep that persists expired leases as
    /// free. `0` disables the sweep; expiry is still observed lazily.
    #[serde(default)]
    pub sweep_interval_seconds: u64,
}

impl Default for LeaseConfig {
    fn default() -> Self {
        Self {
            default_ttl_seconds: default_ttl(),
            min_ttl_seconds: default_min_ttl(),
            max_ttl_seconds: default_max_ttl(),
            sweep_interval_seconds: 0,
        }
    }
}

impl LeaseConfig {
    /// Resolve a requested TTL into the effective lease length in seconds.
    pub fn effective_ttl(&self, requested: Option<u64>) -> u64 {
        requested
            .unwrap_or(self.default_ttl_seconds)
            .clamp(self.min_ttl_seconds, self.max_ttl_seconds)
    }

    /// Reject policies that cannot produce a sensible lease.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.min_ttl_seconds == 0 {
            return Err(AppError::configuration(
                "lease.min_ttl_seconds must be greater than zero",
            ));
        }
        if self.min_ttl_seconds > self.default_ttl_seconds {
            return Err(AppError::configuration(
                "lease.min_ttl_seconds must not exceed lease.default_ttl_seconds",
            ));
        }
        if self.default_ttl_seconds > self.max_ttl_seconds {
            return Err(AppError::configuration(
                "lease.default_ttl_seconds must not exceed lease.max_ttl_seconds",
            ));
        }
        Ok(())
    }
}

fn default_ttl() -> u64 {
    120
}

fn default_min_ttl() -> u64 {
    10
}

fn default_max_ttl() -> u64 {
    3600
}
