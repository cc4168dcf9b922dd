//! Custom Axum extractors.

pub mod json;
pub mod seat_query;

pub use json::ValidatedJson;
pub use seat_query::SeatQueryParams;
