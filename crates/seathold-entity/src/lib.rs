//! # seathold-entity
//!
//! Domain records for SeatHold. A [`Seat`] is the only entity the lease
//! manager owns; [`SeatDocument`] is the whole persisted document the seats
//! live in, including collections that belong to other services.

pub mod document;
pub mod seat;

pub use document::SeatDocument;
pub use seat::{LeaseState, Seat, SeatStatus};
