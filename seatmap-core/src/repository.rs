use std::sync::{Mutex, PoisonError};

use crate::models::OccupiedSeat;

pub type RepositoryError = Box<dyn std::error::Error + Send + Sync>;

/// Storage for the occupied seats of one flight
pub trait CabinRepository: Send + Sync {
    /// Read every persisted record. A store that has never been written
    /// yields an empty list.
    fn load(&self) -> Result<Vec<OccupiedSeat>, RepositoryError>;

    /// Replace the persisted state with `seats`
    fn save(&self, seats: &[OccupiedSeat]) -> Result<(), RepositoryError>;
}

/// In-memory repository, used for sessions that should not touch disk
#[derive(Debug, Default)]
pub struct InMemoryCabinRepository {
    records: Mutex<Vec<OccupiedSeat>>,
}

impl InMemoryCabinRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<OccupiedSeat>) -> Self {
        Self {
            records: Mutex::new(records),
        }
    }

    /// Snapshot of the stored records, still readable after a panicked writer
    pub fn records(&self) -> Vec<OccupiedSeat> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl CabinRepository for InMemoryCabinRepository {
    fn load(&self) -> Result<Vec<OccupiedSeat>, RepositoryError> {
        let records = self.records.lock().map_err(|e| e.to_string())?;
        Ok(records.clone())
    }

    fn save(&self, seats: &[OccupiedSeat]) -> Result<(), RepositoryError> {
        let mut records = self.records.lock().map_err(|e| e.to_string())?;
        *records = seats.to_vec();
        Ok(())
    }
}
