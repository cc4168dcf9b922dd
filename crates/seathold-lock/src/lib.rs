//! # seathold-lock
//!
//! The seat-hold lease manager.
//!
//! ## Modules
//!
//! - `store`: in-memory seat records written through to a document gateway
//! - `manager`: Acquire / Refresh / Release / Query state machine
//! - `error`: lease outcomes and their mapping onto `AppError`
//! - `sweeper`: optional periodic persistence of expired leases

pub mod error;
pub mod manager;
pub mod store;
pub mod sweeper;

pub use error::LeaseError;
pub use manager::{LockManager, SeatFilter, SeatStats};
pub use store::SeatStore;
pub use sweeper::LeaseSweeper;
