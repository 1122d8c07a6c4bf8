use crate::models::{OccupiedSeat, SeatAssignment, SeatPreference, ServiceClass};
use crate::report::{
    AvailabilityReport, AvailabilitySection, Manifest, ManifestEntry, ManifestSection, RowAvailability,
};
use crate::repository::{CabinRepository, RepositoryError};
use crate::row::SeatRow;
use crate::seat::{Seat, SeatColumn};

pub const FIRST_CLASS_ROWS: u32 = 2;
pub const ECONOMY_CLASS_ROWS: u32 = 20;

/// Seat inventory for one aircraft: rows 1-2 First, rows 3-22 Economy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cabin {
    first_class: Vec<SeatRow>,
    economy: Vec<SeatRow>,
}

impl Cabin {
    pub fn new() -> Self {
        let first_class = (1..=FIRST_CLASS_ROWS)
            .map(|number| SeatRow::new(number, ServiceClass::First))
            .collect();
        let economy = (FIRST_CLASS_ROWS + 1..=FIRST_CLASS_ROWS + ECONOMY_CLASS_ROWS)
            .map(|number| SeatRow::new(number, ServiceClass::Economy))
            .collect();

        Self { first_class, economy }
    }

    /// Rows of one partition in ascending row order
    pub fn rows(&self, class: ServiceClass) -> &[SeatRow] {
        match class {
            ServiceClass::First => &self.first_class,
            ServiceClass::Economy => &self.economy,
        }
    }

    fn rows_mut(&mut self, class: ServiceClass) -> &mut [SeatRow] {
        match class {
            ServiceClass::First => &mut self.first_class,
            ServiceClass::Economy => &mut self.economy,
        }
    }

    fn row_mut(&mut self, class: ServiceClass, number: u32) -> Option<&mut SeatRow> {
        self.rows_mut(class).iter_mut().find(|row| row.number() == number)
    }

    pub fn capacity(&self, class: ServiceClass) -> usize {
        self.rows(class).iter().map(SeatRow::width).sum()
    }

    pub fn occupied_count(&self, class: ServiceClass) -> usize {
        self.rows(class).iter().map(|row| row.occupied_seats().count()).sum()
    }

    /// Seat one passenger in the first row (lowest number first) that has a
    /// free seat matching the preference.
    pub fn reserve_single(
        &mut self,
        name: &str,
        class: ServiceClass,
        preference: SeatPreference,
    ) -> Result<SeatAssignment, ReservationError> {
        for row in self.rows_mut(class) {
            let Some(column) = row.find_by_preference(preference).map(Seat::column) else {
                continue;
            };

            if let Some(seat) = row.seat_by_column_mut(column) {
                if seat.reserve(name).is_ok() {
                    tracing::info!(seat = %seat.id(), %class, %preference, "reserved seat");
                    return Ok(SeatAssignment {
                        seat: seat.id(),
                        passenger: name.to_string(),
                    });
                }
            }
        }

        tracing::debug!(%class, %preference, "no seat matches preference");
        Err(ReservationError::NoMatchingSeat { class, preference })
    }

    /// Seat a whole group or nobody.
    ///
    /// Repeatedly takes the row with the longest free run (lowest row number on
    /// ties) and fills as much of that run as the remaining passengers need,
    /// in order. If the class runs out of free seats before everyone is placed,
    /// every seat taken by this call is released again.
    pub fn reserve_group<S: AsRef<str>>(
        &mut self,
        names: &[S],
        class: ServiceClass,
    ) -> Result<Vec<SeatAssignment>, ReservationError> {
        let requested = names.len();
        let mut remaining = names;
        let mut seated: Vec<SeatAssignment> = Vec::with_capacity(requested);

        while !remaining.is_empty() {
            let mut best: Option<(usize, usize)> = None;
            for (index, row) in self.rows(class).iter().enumerate() {
                let free = row.max_contiguous_free();
                if free > best.map_or(0, |(_, most)| most) {
                    best = Some((index, free));
                }
            }

            let Some((index, free)) = best else {
                self.roll_back(class, &seated);
                return Err(ReservationError::InsufficientContiguousSpace { class, requested });
            };

            let take = free.min(remaining.len());
            let (batch, rest) = remaining.split_at(take);

            let row = &mut self.rows_mut(class)[index];
            let block: Vec<SeatAssignment> = row
                .reserve_contiguous_block(batch)
                .iter()
                .zip(batch)
                .map(|(seat, name)| SeatAssignment {
                    seat: seat.id(),
                    passenger: AsRef::<str>::as_ref(name).to_string(),
                })
                .collect();
            let short = block.len() != take;
            seated.extend(block);

            if short {
                self.roll_back(class, &seated);
                return Err(ReservationError::InsufficientContiguousSpace { class, requested });
            }

            tracing::debug!(row = self.rows(class)[index].number(), seated = take, "placed group block");
            remaining = rest;
        }

        tracing::info!(%class, size = requested, "reserved group");
        Ok(seated)
    }

    fn roll_back(&mut self, class: ServiceClass, seated: &[SeatAssignment]) {
        if !seated.is_empty() {
            tracing::warn!(%class, released = seated.len(), "rolling back partial group reservation");
        }

        for assignment in seated {
            if let Some(seat) = self
                .row_mut(class, assignment.seat.row)
                .and_then(|row| row.seat_by_column_mut(assignment.seat.column))
            {
                seat.cancel();
            }
        }
    }

    /// Cancel one reservation per requested name, searching First then Economy.
    /// Returns the names that were found and cancelled; unknown names are skipped.
    pub fn cancel_by_names<S: AsRef<str>>(&mut self, names: &[S]) -> Vec<String> {
        let mut cancelled = Vec::new();

        for name in names {
            let name: &str = name.as_ref();
            let hit = self
                .first_class
                .iter_mut()
                .chain(self.economy.iter_mut())
                .flat_map(SeatRow::seats_mut)
                .find(|seat| seat.passenger().is_some_and(|p| same_passenger(p, name)));

            if let Some(seat) = hit {
                tracing::info!(seat = %seat.id(), passenger = name, "cancelled reservation");
                seat.cancel();
                cancelled.push(name.to_string());
            }
        }

        cancelled
    }

    pub fn list_availability(&self) -> AvailabilityReport {
        let sections = ServiceClass::ALL
            .iter()
            .map(|class| AvailabilitySection {
                class: *class,
                rows: self
                    .rows(*class)
                    .iter()
                    .map(|row| RowAvailability {
                        row: row.number(),
                        columns: row.available_seats().map(Seat::column).collect(),
                    })
                    .filter(|row| !row.columns.is_empty())
                    .collect(),
            })
            .collect();

        AvailabilityReport { sections }
    }

    pub fn list_manifest(&self) -> Manifest {
        let sections = ServiceClass::ALL
            .iter()
            .map(|class| ManifestSection {
                class: *class,
                entries: self
                    .rows(*class)
                    .iter()
                    .flat_map(SeatRow::occupied_seats)
                    .filter_map(|seat| {
                        seat.passenger().map(|passenger| ManifestEntry {
                            seat: seat.id(),
                            passenger: passenger.to_string(),
                        })
                    })
                    .collect(),
            })
            .collect();

        Manifest { sections }
    }

    /// Overwrite one seat without validation (state rehydration only).
    /// Returns false when no such seat exists in the given class.
    pub fn set_seat_direct(
        &mut self,
        row: u32,
        column: SeatColumn,
        passenger: Option<String>,
        class: ServiceClass,
    ) -> bool {
        match self.row_mut(class, row).and_then(|r| r.seat_by_column_mut(column)) {
            Some(seat) => {
                seat.set_direct(passenger);
                true
            }
            None => {
                tracing::debug!(row, %column, %class, "no such seat, record ignored");
                false
            }
        }
    }

    /// Occupied seats, First class then Economy, in row and seat order
    pub fn export_occupied(&self) -> Vec<OccupiedSeat> {
        ServiceClass::ALL
            .iter()
            .flat_map(|class| {
                self.rows(*class)
                    .iter()
                    .flat_map(SeatRow::occupied_seats)
                    .filter_map(move |seat| OccupiedSeat::from_seat(seat, *class))
            })
            .collect()
    }

    /// Replay exported records through `set_seat_direct`. Returns how many
    /// records landed on an existing seat.
    pub fn rehydrate<I>(&mut self, records: I) -> usize
    where
        I: IntoIterator<Item = OccupiedSeat>,
    {
        records
            .into_iter()
            .filter(|record| {
                self.set_seat_direct(record.seat.row, record.seat.column, Some(record.passenger.clone()), record.class)
            })
            .count()
    }

    /// Load persisted state. On error the cabin is left untouched.
    pub fn load_from(&mut self, repository: &dyn CabinRepository) -> Result<usize, RepositoryError> {
        let records = repository.load()?;
        let total = records.len();
        let applied = self.rehydrate(records);

        if applied < total {
            tracing::warn!(skipped = total - applied, "records did not match any seat");
        }
        Ok(applied)
    }

    /// Persist every occupied seat. Returns the number of records written.
    pub fn save_to(&self, repository: &dyn CabinRepository) -> Result<usize, RepositoryError> {
        let records = self.export_occupied();
        repository.save(&records)?;
        Ok(records.len())
    }
}

impl Default for Cabin {
    fn default() -> Self {
        Self::new()
    }
}

fn same_passenger(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReservationError {
    #[error("No {preference} seat is available in {class} class")]
    NoMatchingSeat {
        class: ServiceClass,
        preference: SeatPreference,
    },

    #[error("Unable to seat a group of {requested} in {class} class")]
    InsufficientContiguousSpace {
        class: ServiceClass,
        requested: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seat::SeatId;

    fn fill(cabin: &mut Cabin, class: ServiceClass, seats: &[&str]) {
        for id in seats {
            let id: SeatId = id.parse().unwrap();
            assert!(cabin.set_seat_direct(id.row, id.column, Some(format!("p{}", id)), class));
        }
    }

    #[test]
    fn test_cabin_geometry() {
        let cabin = Cabin::new();
        assert_eq!(cabin.rows(ServiceClass::First).len(), 2);
        assert_eq!(cabin.rows(ServiceClass::Economy).len(), 20);
        assert_eq!(cabin.capacity(ServiceClass::First), 8);
        assert_eq!(cabin.capacity(ServiceClass::Economy), 120);

        let numbers: Vec<u32> = cabin.rows(ServiceClass::Economy).iter().map(SeatRow::number).collect();
        assert_eq!(numbers.first(), Some(&3));
        assert_eq!(numbers.last(), Some(&22));
    }

    #[test]
    fn test_reserve_single_first_aisle() {
        let mut cabin = Cabin::new();
        let seat = cabin.reserve_single("Alice", ServiceClass::First, SeatPreference::Aisle).unwrap();
        assert_eq!(seat.seat.to_string(), "1B");

        let seat = cabin.reserve_single("Bob", ServiceClass::First, SeatPreference::Aisle).unwrap();
        assert_eq!(seat.seat.to_string(), "1C");

        let seat = cabin.reserve_single("Cara", ServiceClass::First, SeatPreference::Aisle).unwrap();
        assert_eq!(seat.seat.to_string(), "2B");
    }

    #[test]
    fn test_reserve_single_center_in_first_fails() {
        let mut cabin = Cabin::new();
        let err = cabin
            .reserve_single("Alice", ServiceClass::First, SeatPreference::Center)
            .unwrap_err();
        assert_eq!(
            err,
            ReservationError::NoMatchingSeat {
                class: ServiceClass::First,
                preference: SeatPreference::Center,
            }
        );
        assert_eq!(cabin.occupied_count(ServiceClass::First), 0);
    }

    #[test]
    fn test_group_prefers_largest_block() {
        let mut cabin = Cabin::new();
        // Row 1 keeps a run of 2, row 2 a run of 3
        fill(&mut cabin, ServiceClass::First, &["1A", "1B", "2A"]);

        let seats = cabin.reserve_group(&["a", "b"], ServiceClass::First).unwrap();
        let ids: Vec<String> = seats.iter().map(|s| s.seat.to_string()).collect();
        assert_eq!(ids, vec!["2B", "2C"]);
    }

    #[test]
    fn test_group_tie_goes_to_lowest_row() {
        let mut cabin = Cabin::new();
        let seats = cabin.reserve_group(&["a", "b"], ServiceClass::First).unwrap();
        let ids: Vec<String> = seats.iter().map(|s| s.seat.to_string()).collect();
        assert_eq!(ids, vec!["1A", "1B"]);
    }

    #[test]
    fn test_group_split_and_rollback_in_first() {
        let mut cabin = Cabin::new();
        fill(&mut cabin, ServiceClass::First, &["1A", "2D"]);
        let before = cabin.clone();

        // 3 + 3 free seats exist but a group of 7 cannot fit
        let err = cabin
            .reserve_group(&["a", "b", "c", "d", "e", "f", "g"], ServiceClass::First)
            .unwrap_err();
        assert_eq!(
            err,
            ReservationError::InsufficientContiguousSpace {
                class: ServiceClass::First,
                requested: 7,
            }
        );
        assert_eq!(cabin, before);

        // A group of 6 fills both runs
        let seats = cabin.reserve_group(&["a", "b", "c", "d", "e", "f"], ServiceClass::First).unwrap();
        assert_eq!(seats.len(), 6);
        assert_eq!(cabin.occupied_count(ServiceClass::First), 8);
    }

    #[test]
    fn test_empty_group_is_a_no_op() {
        let mut cabin = Cabin::new();
        let names: [&str; 0] = [];
        assert!(cabin.reserve_group(&names, ServiceClass::Economy).unwrap().is_empty());
        assert_eq!(cabin, Cabin::new());
    }

    #[test]
    fn test_cancel_by_names_case_insensitive() {
        let mut cabin = Cabin::new();
        cabin.reserve_single("Alice", ServiceClass::Economy, SeatPreference::Window).unwrap();
        cabin.reserve_single("Bob", ServiceClass::First, SeatPreference::Window).unwrap();

        let cancelled = cabin.cancel_by_names(&["ALICE", "nobody", "bob"]);
        assert_eq!(cancelled, vec!["ALICE".to_string(), "bob".to_string()]);
        assert_eq!(cabin.occupied_count(ServiceClass::Economy), 0);
        assert_eq!(cabin.occupied_count(ServiceClass::First), 0);

        assert!(cabin.cancel_by_names(&["Alice"]).is_empty());
    }

    #[test]
    fn test_cancel_prefers_first_class_match() {
        let mut cabin = Cabin::new();
        fill(&mut cabin, ServiceClass::Economy, &["3A"]);
        fill(&mut cabin, ServiceClass::First, &["2C"]);
        cabin.set_seat_direct(3, SeatColumn::A, Some("Dup".to_string()), ServiceClass::Economy);
        cabin.set_seat_direct(2, SeatColumn::C, Some("dup".to_string()), ServiceClass::First);

        assert_eq!(cabin.cancel_by_names(&["Dup"]), vec!["Dup".to_string()]);
        assert_eq!(cabin.occupied_count(ServiceClass::First), 0);
        assert_eq!(cabin.occupied_count(ServiceClass::Economy), 1);
    }

    #[test]
    fn test_set_seat_direct_ignores_unknown_seats() {
        let mut cabin = Cabin::new();
        assert!(!cabin.set_seat_direct(3, SeatColumn::A, Some("x".to_string()), ServiceClass::First));
        assert!(!cabin.set_seat_direct(1, SeatColumn::F, Some("x".to_string()), ServiceClass::First));
        assert!(!cabin.set_seat_direct(99, SeatColumn::A, Some("x".to_string()), ServiceClass::Economy));
        assert_eq!(cabin, Cabin::new());
    }

    #[test]
    fn test_export_order() {
        let mut cabin = Cabin::new();
        fill(&mut cabin, ServiceClass::Economy, &["4B", "3F"]);
        fill(&mut cabin, ServiceClass::First, &["2A"]);

        let ids: Vec<String> = cabin.export_occupied().iter().map(|r| r.seat.to_string()).collect();
        assert_eq!(ids, vec!["2A", "3F", "4B"]);
    }

    #[test]
    fn test_availability_omits_full_rows() {
        let mut cabin = Cabin::new();
        fill(&mut cabin, ServiceClass::First, &["1A", "1B", "1C", "1D", "2B"]);

        let report = cabin.list_availability();
        let first = &report.sections[0];
        assert_eq!(first.class, ServiceClass::First);
        assert_eq!(first.rows.len(), 1);
        assert_eq!(first.rows[0].row, 2);
        assert_eq!(first.rows[0].columns, vec![SeatColumn::A, SeatColumn::C, SeatColumn::D]);
        assert_eq!(report.sections[1].rows.len(), 20);
    }

    #[test]
    fn test_manifest_order() {
        let mut cabin = Cabin::new();
        cabin.reserve_group(&["x", "y"], ServiceClass::Economy).unwrap();
        cabin.reserve_single("z", ServiceClass::First, SeatPreference::Window).unwrap();

        let manifest = cabin.list_manifest();
        assert_eq!(manifest.sections[0].entries.len(), 1);
        assert_eq!(manifest.sections[0].entries[0].seat.to_string(), "1A");
        let economy: Vec<(String, String)> = manifest.sections[1]
            .entries
            .iter()
            .map(|e| (e.seat.to_string(), e.passenger.clone()))
            .collect();
        assert_eq!(
            economy,
            vec![("3A".to_string(), "x".to_string()), ("3B".to_string(), "y".to_string())]
        );
    }
}
