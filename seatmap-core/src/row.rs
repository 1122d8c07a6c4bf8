use crate::geometry::candidate_indices;
use crate::models::{SeatPreference, ServiceClass};
use crate::seat::{Seat, SeatColumn};

/// One physical row of seats in a single service class
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeatRow {
    number: u32,
    class: ServiceClass,
    seats: Vec<Seat>,
}

impl SeatRow {
    pub fn new(number: u32, class: ServiceClass) -> Self {
        let seats = class
            .columns()
            .iter()
            .map(|column| Seat::new(number, *column))
            .collect();

        Self { number, class, seats }
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn class(&self) -> ServiceClass {
        self.class
    }

    pub fn width(&self) -> usize {
        self.seats.len()
    }

    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }

    pub(crate) fn seats_mut(&mut self) -> impl Iterator<Item = &mut Seat> {
        self.seats.iter_mut()
    }

    /// First free seat matching the preference, tried in geometry order
    pub fn find_by_preference(&self, preference: SeatPreference) -> Option<&Seat> {
        candidate_indices(preference, self.seats.len())
            .into_iter()
            .filter_map(|index| self.seats.get(index))
            .find(|seat| !seat.is_occupied())
    }

    /// Length of the longest run of free seats
    pub fn max_contiguous_free(&self) -> usize {
        let mut best = 0;
        let mut current = 0;

        for seat in &self.seats {
            if seat.is_occupied() {
                current = 0;
            } else {
                current += 1;
                best = best.max(current);
            }
        }

        best
    }

    /// Reserve the leftmost run of `names.len()` free seats, `names[i]` into the
    /// i-th seat of the run. Returns the reserved seats, or an empty slice with
    /// nothing changed when no such run exists.
    pub fn reserve_contiguous_block<S: AsRef<str>>(&mut self, names: &[S]) -> &[Seat] {
        let needed = names.len();
        if needed == 0 || needed > self.seats.len() {
            return &[];
        }

        let Some(start) = self
            .seats
            .windows(needed)
            .position(|window| window.iter().all(|seat| !seat.is_occupied()))
        else {
            return &[];
        };

        let block = start..start + needed;
        for (seat, name) in self.seats[block.clone()].iter_mut().zip(names) {
            let reserved = seat.reserve(AsRef::<str>::as_ref(name));
            debug_assert!(reserved.is_ok(), "seat {} inside a free window", seat.id());
        }

        tracing::debug!(row = self.number, start, len = needed, "reserved contiguous block");
        &self.seats[block]
    }

    pub fn available_seats(&self) -> impl Iterator<Item = &Seat> {
        self.seats.iter().filter(|seat| !seat.is_occupied())
    }

    pub fn occupied_seats(&self) -> impl Iterator<Item = &Seat> {
        self.seats.iter().filter(|seat| seat.is_occupied())
    }

    pub fn seat_by_column(&self, column: SeatColumn) -> Option<&Seat> {
        self.seats.iter().find(|seat| seat.column() == column)
    }

    pub(crate) fn seat_by_column_mut(&mut self, column: SeatColumn) -> Option<&mut Seat> {
        self.seats.iter_mut().find(|seat| seat.column() == column)
    }
}
