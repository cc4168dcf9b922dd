//! Seat entity and lease evaluation.

pub mod lease;
pub mod model;
pub mod status;

pub use lease::LeaseState;
pub use model::Seat;
pub use status::SeatStatus;
