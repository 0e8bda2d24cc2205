use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::Seat;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatState {
    pub seat_number: i32,
    pub is_booked: bool,
}

/// Read-only view of the coach: row number -> seats of that row in seat order.
///
/// Serializes as a JSON object keyed by row number, e.g.
/// `{"1": [{"seat_number": 1, "is_booked": false}, ...], ...}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeatSnapshot {
    pub rows: BTreeMap<i32, Vec<SeatState>>,
}

impl SeatSnapshot {
    pub fn from_seats(seats: &[Seat]) -> Self {
        let mut rows: BTreeMap<i32, Vec<SeatState>> = BTreeMap::new();
        for seat in seats {
            rows.entry(seat.row_number).or_default().push(SeatState {
                seat_number: seat.seat_number,
                is_booked: seat.is_booked,
            });
        }
        // store отдаёт места уже упорядоченными, но не полагаемся на это
        for row in rows.values_mut() {
            row.sort_by_key(|s| s.seat_number);
        }
        Self { rows }
    }

    pub fn total_seats(&self) -> usize {
        self.rows.values().map(Vec::len).sum()
    }

    pub fn booked_seats(&self) -> usize {
        self.rows
            .values()
            .flatten()
            .filter(|s| s.is_booked)
            .count()
    }
}
