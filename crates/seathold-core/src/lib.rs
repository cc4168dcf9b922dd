//! # seathold-core
//!
//! Core crate for SeatHold. Contains configuration schemas, the clock
//! abstraction used for lease expiry, typed identifiers, and the unified
//! error system.
//!
//! This crate has **no** internal dependencies on other SeatHold crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
