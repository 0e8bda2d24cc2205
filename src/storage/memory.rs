use std::collections::BTreeMap;
use std::sync::RwLock;

use super::{SeatStore, StoreFuture};
use crate::error::StoreError;
use crate::models::Seat;

/// In-process seat store. Used when no database is configured and in tests.
#[derive(Debug, Default)]
pub struct MemorySeatStore {
    // seat_id -> seat
    seats: RwLock<BTreeMap<i32, Seat>>,
}

impl MemorySeatStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn seed_sync(&self, seats: Vec<Seat>) -> Result<u64, StoreError> {
        let mut stored = self.seats.write().map_err(|_| StoreError::Poisoned)?;
        let mut inserted = 0;
        for seat in seats {
            let taken = stored.contains_key(&seat.seat_id)
                || stored.values().any(|s| s.position() == seat.position());
            if !taken {
                stored.insert(seat.seat_id, seat);
                inserted += 1;
            }
        }
        Ok(inserted)
    }

    fn load_sync(&self) -> Result<Vec<Seat>, StoreError> {
        let stored = self.seats.read().map_err(|_| StoreError::Poisoned)?;
        let mut seats: Vec<Seat> = stored.values().cloned().collect();
        seats.sort_by_key(Seat::position);
        Ok(seats)
    }

    fn mark_booked_sync(&self, seat_ids: Vec<i32>) -> Result<(), StoreError> {
        let mut stored = self.seats.write().map_err(|_| StoreError::Poisoned)?;

        // Сначала проверяем все места, потом меняем: либо все, либо ничего
        let unavailable: Vec<i32> = seat_ids
            .iter()
            .copied()
            .filter(|id| stored.get(id).map_or(true, |s| s.is_booked))
            .collect();
        if !unavailable.is_empty() {
            return Err(StoreError::Conflict { seat_ids: unavailable });
        }

        for id in &seat_ids {
            if let Some(seat) = stored.get_mut(id) {
                seat.is_booked = true;
            }
        }
        Ok(())
    }
}

impl SeatStore for MemorySeatStore {
    fn seed(&self, seats: Vec<Seat>) -> StoreFuture<'_, u64> {
        Box::pin(async move { self.seed_sync(seats) })
    }

    fn count(&self) -> StoreFuture<'_, usize> {
        Box::pin(async move {
            let stored = self.seats.read().map_err(|_| StoreError::Poisoned)?;
            Ok(stored.len())
        })
    }

    fn load_seats(&self) -> StoreFuture<'_, Vec<Seat>> {
        Box::pin(async move { self.load_sync() })
    }

    fn mark_booked(&self, seat_ids: Vec<i32>) -> StoreFuture<'_, ()> {
        Box::pin(async move { self.mark_booked_sync(seat_ids) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{coach_layout, TOTAL_SEATS};

    #[tokio::test]
    async fn seed_is_idempotent() {
        let store = MemorySeatStore::new();
        assert_eq!(store.seed(coach_layout()).await.unwrap(), 80);
        assert_eq!(store.seed(coach_layout()).await.unwrap(), 0);
        assert_eq!(store.count().await.unwrap(), TOTAL_SEATS);
    }

    #[tokio::test]
    async fn seed_completes_partial_store_without_touching_bookings() {
        let store = MemorySeatStore::new();
        let layout = coach_layout();
        store.seed(layout[..10].to_vec()).await.unwrap();
        store.mark_booked(vec![2, 3]).await.unwrap();

        assert_eq!(store.seed(layout).await.unwrap(), 70);
        let seats = store.load_seats().await.unwrap();
        assert_eq!(seats.len(), 80);
        let booked: Vec<i32> = seats.iter().filter(|s| s.is_booked).map(|s| s.seat_id).collect();
        assert_eq!(booked, vec![2, 3]);
    }

    #[tokio::test]
    async fn mark_booked_is_all_or_nothing() {
        let store = MemorySeatStore::new();
        store.seed(coach_layout()).await.unwrap();
        store.mark_booked(vec![5]).await.unwrap();

        let err = store.mark_booked(vec![4, 5, 6]).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict { ref seat_ids } if seat_ids == &vec![5]));

        let booked: Vec<i32> = store
            .load_seats()
            .await
            .unwrap()
            .into_iter()
            .filter(|s| s.is_booked)
            .map(|s| s.seat_id)
            .collect();
        assert_eq!(booked, vec![5]);
    }

    #[tokio::test]
    async fn unknown_seat_is_a_conflict() {
        let store = MemorySeatStore::new();
        store.seed(coach_layout()).await.unwrap();
        assert!(matches!(
            store.mark_booked(vec![81]).await,
            Err(StoreError::Conflict { .. })
        ));
    }
}
