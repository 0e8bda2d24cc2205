pub mod allocation;
pub mod seat_map;
