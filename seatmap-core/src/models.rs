use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::seat::{Seat, SeatColumn, SeatId};
use crate::CoreError;

/// Cabin partition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ServiceClass {
    First,
    Economy,
}

impl ServiceClass {
    /// Partitions in reporting and persistence order
    pub const ALL: [ServiceClass; 2] = [ServiceClass::First, ServiceClass::Economy];

    pub fn name(&self) -> &'static str {
        match self {
            ServiceClass::First => "First",
            ServiceClass::Economy => "Economy",
        }
    }

    /// Column labels of a row in this class, left to right
    pub fn columns(&self) -> &'static [SeatColumn] {
        match self {
            ServiceClass::First => &SeatColumn::FIRST_CLASS,
            ServiceClass::Economy => &SeatColumn::ECONOMY,
        }
    }
}

impl fmt::Display for ServiceClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ServiceClass {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("first") {
            Ok(ServiceClass::First)
        } else if s.eq_ignore_ascii_case("economy") {
            Ok(ServiceClass::Economy)
        } else {
            Err(CoreError::InvalidInput(format!("service class '{}'", s)))
        }
    }
}

/// Requested seat position within a row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeatPreference {
    Window,
    Aisle,
    Center,
}

impl fmt::Display for SeatPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SeatPreference::Window => "Window",
            SeatPreference::Aisle => "Aisle",
            SeatPreference::Center => "Center",
        };
        f.write_str(name)
    }
}

impl FromStr for SeatPreference {
    type Err = CoreError;

    /// Accepts the single-letter codes (`W`, `A`, `C`) or the full words
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "W" | "WINDOW" => Ok(SeatPreference::Window),
            "A" | "AISLE" => Ok(SeatPreference::Aisle),
            "C" | "CENTER" => Ok(SeatPreference::Center),
            _ => Err(CoreError::InvalidInput(format!("seat preference '{}'", s.trim()))),
        }
    }
}

/// A seat handed out by a reservation call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeatAssignment {
    pub seat: SeatId,
    pub passenger: String,
}

/// Persisted record of one occupied seat
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OccupiedSeat {
    pub seat: SeatId,
    pub passenger: String,
    pub class: ServiceClass,
}

impl OccupiedSeat {
    pub(crate) fn from_seat(seat: &Seat, class: ServiceClass) -> Option<Self> {
        seat.passenger().map(|passenger| Self {
            seat: seat.id(),
            passenger: passenger.to_string(),
            class,
        })
    }
}
