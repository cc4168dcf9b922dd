//! HTTP-level integration tests for the SeatHold server.

mod helpers;

mod health_test;
mod persistence_test;
mod seat_lock_test;
