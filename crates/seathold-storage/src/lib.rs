//! # seathold-storage
//!
//! Persistence gateways for the seat document. A gateway only knows how to
//! load and save the whole document; it offers no partial updates and no
//! transactions; serializing writers is the seat store's job.

pub mod gateway;
pub mod manager;
pub mod providers;

pub use gateway::DocumentGateway;
pub use manager::build_gateway;
