//! Core type definitions used across the SeatHold workspace.

pub mod id;

pub use id::{OwnerId, RoomId, SeatId};
