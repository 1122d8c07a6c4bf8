use seatmap_core::{CabinRepository, OccupiedSeat, RepositoryError, SeatId, ServiceClass};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Line-oriented flight file, one `<seatId>,<passenger>,<class>` line per occupied seat
#[derive(Debug, Clone)]
pub struct FlightFileRepository {
    path: PathBuf,
}

impl FlightFileRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<Vec<OccupiedSeat>, StoreError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("No flight file at {}, starting with an empty cabin", self.path.display());
                return Ok(Vec::new());
            }
            Err(source) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let mut records = Vec::new();
        for (index, line) in contents.lines().enumerate() {
            match parse_record(line) {
                Some(record) => records.push(record),
                None if line.trim().is_empty() => {}
                None => warn!("Skipping malformed line {} of {}: {:?}", index + 1, self.path.display(), line),
            }
        }

        info!("Loaded {} records from {}", records.len(), self.path.display());
        Ok(records)
    }

    fn write(&self, seats: &[OccupiedSeat]) -> Result<(), StoreError> {
        let mut contents = String::new();
        for seat in seats {
            contents.push_str(&format_record(seat));
            contents.push('\n');
        }

        let io_error = |source| StoreError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_error)?;
        }
        fs::write(&self.path, contents).map_err(io_error)?;

        info!("Saved {} records to {}", seats.len(), self.path.display());
        Ok(())
    }
}

impl CabinRepository for FlightFileRepository {
    fn load(&self) -> Result<Vec<OccupiedSeat>, RepositoryError> {
        Ok(self.read()?)
    }

    fn save(&self, seats: &[OccupiedSeat]) -> Result<(), RepositoryError> {
        Ok(self.write(seats)?)
    }
}

/// Parse one flight file line. Returns `None` for anything that does not
/// describe a seat: wrong field count, bad row number, unknown column or class.
pub fn parse_record(line: &str) -> Option<OccupiedSeat> {
    let fields: Vec<&str> = line.split(',').collect();
    let [seat, passenger, class] = fields.as_slice() else {
        return None;
    };

    let seat: SeatId = match seat.parse() {
        Ok(seat) => seat,
        Err(e) => {
            debug!("Ignoring record with {}", e);
            return None;
        }
    };
    let class: ServiceClass = match class.parse() {
        Ok(class) => class,
        Err(e) => {
            debug!("Ignoring record with {}", e);
            return None;
        }
    };

    Some(OccupiedSeat {
        seat,
        passenger: passenger.to_string(),
        class,
    })
}

pub fn format_record(record: &OccupiedSeat) -> String {
    format!("{},{},{}", record.seat, record.passenger, record.class)
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Error loading data from {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error saving data to {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
