use serde::Serialize;
use std::fmt;

use crate::models::ServiceClass;
use crate::seat::{SeatColumn, SeatId};

/// Free seats per row, First class first. Full rows are left out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AvailabilityReport {
    pub sections: Vec<AvailabilitySection>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AvailabilitySection {
    pub class: ServiceClass,
    pub rows: Vec<RowAvailability>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowAvailability {
    pub row: u32,
    pub columns: Vec<SeatColumn>,
}

impl AvailabilityReport {
    pub fn available_count(&self) -> usize {
        self.sections
            .iter()
            .flat_map(|section| &section.rows)
            .map(|row| row.columns.len())
            .sum()
    }
}

impl fmt::Display for AvailabilityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for section in &self.sections {
            writeln!(f, "{}", section.class)?;
            for row in &section.rows {
                let columns: Vec<String> = row.columns.iter().map(SeatColumn::to_string).collect();
                writeln!(f, "{}: {}", row.row, columns.join(", "))?;
            }
        }
        Ok(())
    }
}

/// Occupied seats with their passengers, First class first
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Manifest {
    pub sections: Vec<ManifestSection>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManifestSection {
    pub class: ServiceClass,
    pub entries: Vec<ManifestEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManifestEntry {
    pub seat: SeatId,
    pub passenger: String,
}

impl Manifest {
    pub fn passenger_count(&self) -> usize {
        self.sections.iter().map(|section| section.entries.len()).sum()
    }
}

impl fmt::Display for Manifest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for section in &self.sections {
            writeln!(f, "{}", section.class)?;
            for entry in &section.entries {
                writeln!(f, "{}: {}", entry.seat, entry.passenger)?;
            }
        }
        Ok(())
    }
}
