//! Seat position policy: which seat indices of a row satisfy a preference.

use crate::models::SeatPreference;

/// Candidate seat indices (0-based, left to right) for `preference` in a row
/// of `width` seats, in the order they should be tried.
pub fn candidate_indices(preference: SeatPreference, width: usize) -> Vec<usize> {
    match (preference, width) {
        (_, 0) => Vec::new(),
        (SeatPreference::Window, 1) => vec![0],
        (SeatPreference::Window, w) => vec![0, w - 1],
        (SeatPreference::Aisle, 4) => vec![1, 2],
        (SeatPreference::Aisle, 6) => vec![2, 3],
        (SeatPreference::Center, 6) => vec![1, 4],
        _ => Vec::new(),
    }
}
