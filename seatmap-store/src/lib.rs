pub mod app_config;
pub mod flight_file;

pub use app_config::{Config, ReportFormat};
pub use flight_file::{FlightFileRepository, StoreError};
