use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Number of rows in the coach.
pub const ROW_COUNT: i32 = 12;
/// Seats in every row except the last one.
pub const SEATS_PER_ROW: i32 = 7;
/// The last row is shorter.
pub const LAST_ROW_SEATS: i32 = 3;
/// 11 * 7 + 3
pub const TOTAL_SEATS: usize = 80;

#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Seat {
    pub seat_id: i32,
    pub row_number: i32,
    pub seat_number: i32,
    pub is_booked: bool,
}

impl Seat {
    pub fn is_free(&self) -> bool {
        !self.is_booked
    }

    // Ключ сортировки (ряд, номер места)
    pub fn position(&self) -> (i32, i32) {
        (self.row_number, self.seat_number)
    }
}

/// Number of seats physically present in `row`, 0 for rows outside the coach.
pub fn seats_in_row(row: i32) -> i32 {
    match row {
        1..=11 => SEATS_PER_ROW,
        ROW_COUNT => LAST_ROW_SEATS,
        _ => 0,
    }
}

/// The seats of a freshly built coach, all free.
///
/// Ids are assigned `1..=80` in (row, seat number) order so that seeding the
/// same layout twice always produces the same records.
pub fn coach_layout() -> Vec<Seat> {
    let mut seats = Vec::with_capacity(TOTAL_SEATS);
    let mut seat_id = 0;
    for row_number in 1..=ROW_COUNT {
        for seat_number in 1..=seats_in_row(row_number) {
            seat_id += 1;
            seats.push(Seat {
                seat_id,
                row_number,
                seat_number,
                is_booked: false,
            });
        }
    }
    seats
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_has_eighty_seats() {
        let seats = coach_layout();
        assert_eq!(seats.len(), TOTAL_SEATS);
        assert!(seats.iter().all(Seat::is_free));
    }

    #[test]
    fn layout_rows_have_expected_lengths() {
        let seats = coach_layout();
        for row in 1..=11 {
            assert_eq!(seats.iter().filter(|s| s.row_number == row).count(), 7);
        }
        assert_eq!(seats.iter().filter(|s| s.row_number == 12).count(), 3);
        assert_eq!(seats_in_row(0), 0);
        assert_eq!(seats_in_row(13), 0);
    }

    #[test]
    fn layout_ids_follow_position_order() {
        let seats = coach_layout();
        let ids: Vec<i32> = seats.iter().map(|s| s.seat_id).collect();
        assert_eq!(ids, (1..=80).collect::<Vec<_>>());
        assert!(seats.windows(2).all(|w| w[0].position() < w[1].position()));

        let last = seats.last().unwrap();
        assert_eq!((last.seat_id, last.row_number, last.seat_number), (80, 12, 3));
    }
}
