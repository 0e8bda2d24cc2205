//! Seat persistence.
//!
//! [`SeatStore`] is object safe (boxed futures instead of `async fn`) so the
//! booking service can hold any backend as `Arc<dyn SeatStore>`.

use std::future::Future;
use std::pin::Pin;

use crate::error::StoreError;
use crate::models::Seat;

pub mod memory;
pub mod postgres;

pub use memory::MemorySeatStore;
pub use postgres::PgSeatStore;

pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StoreError>> + Send + 'a>>;

pub trait SeatStore: Send + Sync {
    /// Insert the seats that are not stored yet. Existing records (matched by
    /// seat id or by row/seat number) are left untouched, booked flag included.
    ///
    /// Returns the number of inserted seats.
    fn seed(&self, seats: Vec<Seat>) -> StoreFuture<'_, u64>;

    fn count(&self) -> StoreFuture<'_, usize>;

    /// All seats ordered by row, then seat number, read as one consistent view.
    fn load_seats(&self) -> StoreFuture<'_, Vec<Seat>>;

    /// Book exactly `seat_ids` in one atomic step.
    ///
    /// Fails with [`StoreError::Conflict`] and changes nothing if any of the
    /// seats is already booked or does not exist.
    fn mark_booked(&self, seat_ids: Vec<i32>) -> StoreFuture<'_, ()>;
}
