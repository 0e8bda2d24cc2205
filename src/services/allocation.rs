//! Выбор мест для брони.
//!
//! Row-first: the first row (in row order) with enough free seats wins, even
//! if a later row would be a tighter fit. When no row has enough, the first
//! free seats in (row, seat number) order are taken across row boundaries.

use std::collections::BTreeMap;

use crate::error::BookingError;
use crate::models::Seat;

pub const MAX_SEATS_PER_BOOKING: usize = 7;

/// Requested number of seats, always within `1..=MAX_SEATS_PER_BOOKING`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeatCount(usize);

impl SeatCount {
    pub fn new(count: i64) -> Result<Self, BookingError> {
        match usize::try_from(count) {
            Ok(n) if (1..=MAX_SEATS_PER_BOOKING).contains(&n) => Ok(SeatCount(n)),
            _ => Err(BookingError::invalid_count()),
        }
    }

    pub fn get(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// All seats come from one row.
    SingleRow { row: i32, seat_ids: Vec<i32> },
    /// No row had enough room; seats may span rows.
    Scattered { seat_ids: Vec<i32> },
    Insufficient { available: usize },
}

impl Selection {
    pub fn into_result(self, requested: SeatCount) -> Result<Vec<i32>, BookingError> {
        match self {
            Selection::SingleRow { seat_ids, .. } | Selection::Scattered { seat_ids } => Ok(seat_ids),
            Selection::Insufficient { available } => Err(BookingError::InsufficientCapacity {
                requested: requested.get(),
                available,
            }),
        }
    }
}

pub fn select_seats(seats: &[Seat], count: SeatCount) -> Selection {
    let wanted = count.get();

    let mut free: Vec<&Seat> = seats.iter().filter(|s| s.is_free()).collect();
    free.sort_by_key(|s| s.position());

    if free.len() < wanted {
        return Selection::Insufficient { available: free.len() };
    }

    // 1) первый ряд, где хватает свободных мест
    let mut by_row: BTreeMap<i32, Vec<i32>> = BTreeMap::new();
    for seat in &free {
        by_row.entry(seat.row_number).or_default().push(seat.seat_id);
    }
    if let Some((&row, ids)) = by_row.iter().find(|(_, ids)| ids.len() >= wanted) {
        return Selection::SingleRow {
            row,
            seat_ids: ids[..wanted].to_vec(),
        };
    }

    // 2) ближайшие свободные места по всему вагону
    Selection::Scattered {
        seat_ids: free.iter().take(wanted).map(|s| s.seat_id).collect(),
    }
}
