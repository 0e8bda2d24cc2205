pub mod seat;
pub mod snapshot;

pub use seat::{coach_layout, seats_in_row, Seat, LAST_ROW_SEATS, ROW_COUNT, SEATS_PER_ROW, TOTAL_SEATS};
pub use snapshot::{SeatSnapshot, SeatState};
