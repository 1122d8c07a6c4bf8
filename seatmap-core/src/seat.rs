use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::CoreError;

/// Seat letter within a row, left to right
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SeatColumn {
    A,
    B,
    C,
    D,
    E,
    F,
}

impl SeatColumn {
    pub const FIRST_CLASS: [SeatColumn; 4] = [SeatColumn::A, SeatColumn::B, SeatColumn::C, SeatColumn::D];

    pub const ECONOMY: [SeatColumn; 6] = [
        SeatColumn::A,
        SeatColumn::B,
        SeatColumn::C,
        SeatColumn::D,
        SeatColumn::E,
        SeatColumn::F,
    ];

    pub fn as_char(&self) -> char {
        match self {
            SeatColumn::A => 'A',
            SeatColumn::B => 'B',
            SeatColumn::C => 'C',
            SeatColumn::D => 'D',
            SeatColumn::E => 'E',
            SeatColumn::F => 'F',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'A' => Some(SeatColumn::A),
            'B' => Some(SeatColumn::B),
            'C' => Some(SeatColumn::C),
            'D' => Some(SeatColumn::D),
            'E' => Some(SeatColumn::E),
            'F' => Some(SeatColumn::F),
            _ => None,
        }
    }
}

impl fmt::Display for SeatColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Physical seat identity, rendered as row number followed by column (`14C`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SeatId {
    pub row: u32,
    pub column: SeatColumn,
}

impl SeatId {
    pub fn new(row: u32, column: SeatColumn) -> Self {
        Self { row, column }
    }
}

impl fmt::Display for SeatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.row, self.column)
    }
}

impl FromStr for SeatId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CoreError::InvalidInput(format!("seat id '{}'", s));

        let column_char = s.chars().last().ok_or_else(invalid)?;
        let column = SeatColumn::from_char(column_char).ok_or_else(invalid)?;
        let row_part = &s[..s.len() - column_char.len_utf8()];
        let row: u32 = row_part.parse().map_err(|_| invalid())?;

        if row == 0 {
            return Err(invalid());
        }

        Ok(Self { row, column })
    }
}

impl Serialize for SeatId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A single seat cell. Occupancy is derived from the passenger name, so a seat
/// can never be occupied without one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seat {
    id: SeatId,
    passenger: Option<String>,
}

impl Seat {
    pub fn new(row: u32, column: SeatColumn) -> Self {
        Self {
            id: SeatId::new(row, column),
            passenger: None,
        }
    }

    pub fn id(&self) -> SeatId {
        self.id
    }

    pub fn row(&self) -> u32 {
        self.id.row
    }

    pub fn column(&self) -> SeatColumn {
        self.id.column
    }

    pub fn passenger(&self) -> Option<&str> {
        self.passenger.as_deref()
    }

    pub fn is_occupied(&self) -> bool {
        self.passenger.is_some()
    }

    /// Assign a passenger to a free seat
    pub fn reserve(&mut self, name: impl Into<String>) -> Result<(), SeatError> {
        if self.is_occupied() {
            return Err(SeatError::AlreadyOccupied { seat: self.id });
        }

        self.passenger = Some(name.into());
        Ok(())
    }

    /// Release the seat. Releasing a free seat is a no-op.
    pub fn cancel(&mut self) {
        self.passenger = None;
    }

    /// Overwrite the passenger without any occupancy check (state rehydration only)
    pub fn set_direct(&mut self, passenger: Option<String>) {
        self.passenger = passenger;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SeatError {
    #[error("Seat {seat} is already occupied")]
    AlreadyOccupied { seat: SeatId },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserve_and_cancel() {
        let mut seat = Seat::new(3, SeatColumn::A);
        assert!(!seat.is_occupied());

        seat.reserve("Alice").unwrap();
        assert!(seat.is_occupied());
        assert_eq!(seat.passenger(), Some("Alice"));

        // Second reservation is refused and leaves the first passenger in place
        let err = seat.reserve("Bob").unwrap_err();
        assert_eq!(err, SeatError::AlreadyOccupied { seat: SeatId::new(3, SeatColumn::A) });
        assert_eq!(seat.passenger(), Some("Alice"));

        seat.cancel();
        assert!(!seat.is_occupied());
        assert_eq!(seat.passenger(), None);
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let mut seat = Seat::new(1, SeatColumn::D);
        seat.cancel();
        seat.cancel();
        assert!(!seat.is_occupied());

        seat.reserve("Cara").unwrap();
        seat.cancel();
        let once = seat.clone();
        seat.cancel();
        assert_eq!(seat, once);
    }

    #[test]
    fn test_set_direct_bypasses_occupancy() {
        let mut seat = Seat::new(5, SeatColumn::C);
        seat.reserve("Alice").unwrap();

        seat.set_direct(Some("Bob".to_string()));
        assert_eq!(seat.passenger(), Some("Bob"));
        assert!(seat.is_occupied());

        seat.set_direct(None);
        assert!(!seat.is_occupied());
    }

    #[test]
    fn test_seat_id_parsing() {
        let id: SeatId = "14C".parse().unwrap();
        assert_eq!(id, SeatId::new(14, SeatColumn::C));
        assert_eq!(id.to_string(), "14C");

        assert!("".parse::<SeatId>().is_err());
        assert!("C".parse::<SeatId>().is_err());
        assert!("0A".parse::<SeatId>().is_err());
        assert!("3G".parse::<SeatId>().is_err());
        assert!("x3A".parse::<SeatId>().is_err());
        assert!("3a".parse::<SeatId>().is_err());
    }
}
