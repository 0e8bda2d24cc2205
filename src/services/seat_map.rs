use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::error::{BookingError, StoreError};
use crate::models::{coach_layout, SeatSnapshot, TOTAL_SEATS};
use crate::services::allocation::{select_seats, SeatCount, Selection};
use crate::storage::SeatStore;

const MAX_COMMIT_ATTEMPTS: usize = TOTAL_SEATS;

/// Seat inventory of the coach and the only path that books seats.
///
/// Every `allocate` call runs load -> select -> commit under one lock, so two
/// concurrent bookings in this process never pick the same seat. Writers
/// outside the lock (another `SeatMap` or process on the same store) are
/// caught by the store's conditional commit; `allocate` then reloads and
/// selects again instead of failing. `snapshot` skips the
/// lock: the store commits each booking in one atomic step, so readers see
/// either the state before it or after it.
pub struct SeatMap {
    store: Arc<dyn SeatStore>,
    booking_lock: Mutex<()>,
}

impl SeatMap {
    pub fn new(store: Arc<dyn SeatStore>) -> Self {
        Self {
            store,
            booking_lock: Mutex::new(()),
        }
    }

    /// Seed the fixed coach layout. Safe to call any number of times.
    pub async fn initialize(&self) -> Result<(), BookingError> {
        let _guard = self.booking_lock.lock().await;

        let existing = self.store.count().await?;
        if existing >= TOTAL_SEATS {
            debug!("seat map already initialized with {} seats", existing);
            return Ok(());
        }

        let inserted = self.store.seed(coach_layout()).await?;
        info!("🚆 Coach initialized: {} seats added ({} already present)", inserted, existing);
        Ok(())
    }

    /// Book `count` seats and return their ids in (row, seat number) order.
    pub async fn allocate(&self, count: i64) -> Result<Vec<i32>, BookingError> {
        let count = SeatCount::new(count)?;

        let _guard = self.booking_lock.lock().await;

        // Другой процесс может занять выбранные места между чтением и коммитом.
        // Each conflict means some seats were taken, so the retries are bounded.
        let mut attempt = 0;
        loop {
            attempt += 1;
            let seats = self.store.load_seats().await?;
            let selection = select_seats(&seats, count);

            match &selection {
                Selection::SingleRow { row, .. } => {
                    debug!("booking {} seats in row {}", count.get(), row)
                }
                Selection::Scattered { .. } => {
                    debug!("no row fits {} seats, using nearest free seats", count.get())
                }
                Selection::Insufficient { available } => {
                    warn!("🎫 Cannot book {} seats, only {} free", count.get(), available)
                }
            }

            let seat_ids = selection.into_result(count)?;
            match self.store.mark_booked(seat_ids.clone()).await {
                Ok(()) => {
                    info!("🎫 Booked seats {:?}", seat_ids);
                    return Ok(seat_ids);
                }
                Err(StoreError::Conflict { seat_ids: taken }) if attempt <= MAX_COMMIT_ATTEMPTS => {
                    warn!("seats {:?} taken by another writer, selecting again (attempt {})", taken, attempt);
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    pub async fn snapshot(&self) -> Result<SeatSnapshot, BookingError> {
        let seats = self.store.load_seats().await?;
        Ok(SeatSnapshot::from_seats(&seats))
    }

    pub async fn free_seats(&self) -> Result<usize, BookingError> {
        let seats = self.store.load_seats().await?;
        Ok(seats.iter().filter(|s| s.is_free()).count())
    }
}
