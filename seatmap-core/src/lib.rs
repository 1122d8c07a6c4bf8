pub mod seat;
pub mod models;
pub mod geometry;
pub mod row;
pub mod cabin;
pub mod report;
pub mod repository;

pub use seat::{Seat, SeatColumn, SeatError, SeatId};
pub use models::{OccupiedSeat, SeatAssignment, SeatPreference, ServiceClass};
pub use row::SeatRow;
pub use cabin::{Cabin, ReservationError};
pub use report::{AvailabilityReport, Manifest};
pub use repository::{CabinRepository, InMemoryCabinRepository, RepositoryError};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
