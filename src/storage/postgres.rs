use tracing::{error, warn};

use super::{SeatStore, StoreFuture};
use crate::database::Database;
use crate::error::StoreError;
use crate::models::Seat;

/// Postgres-backed seat store. Table layout lives in `src/migrations`.
#[derive(Clone)]
pub struct PgSeatStore {
    db: Database,
}

impl PgSeatStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    async fn seed_inner(&self, seats: Vec<Seat>) -> Result<u64, StoreError> {
        let ids: Vec<i32> = seats.iter().map(|s| s.seat_id).collect();
        let rows: Vec<i32> = seats.iter().map(|s| s.row_number).collect();
        let numbers: Vec<i32> = seats.iter().map(|s| s.seat_number).collect();
        let booked: Vec<bool> = seats.iter().map(|s| s.is_booked).collect();

        // ON CONFLICT DO NOTHING: уже существующие места (и их статус) не трогаем
        let result = sqlx::query(
            r#"
            INSERT INTO seats (seat_id, row_number, seat_number, is_booked)
            SELECT * FROM UNNEST($1::int4[], $2::int4[], $3::int4[], $4::bool[])
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(&ids)
        .bind(&rows)
        .bind(&numbers)
        .bind(&booked)
        .execute(&self.db.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn count_inner(&self) -> Result<usize, StoreError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM seats")
            .fetch_one(&self.db.pool)
            .await?;
        Ok(usize::try_from(count).unwrap_or_default())
    }

    async fn load_inner(&self) -> Result<Vec<Seat>, StoreError> {
        // один SELECT видит согласованный снимок таблицы
        let seats = sqlx::query_as::<_, Seat>(
            "SELECT seat_id, row_number, seat_number, is_booked
             FROM seats
             ORDER BY row_number, seat_number",
        )
        .fetch_all(&self.db.pool)
        .await?;
        Ok(seats)
    }

    async fn mark_booked_inner(&self, seat_ids: Vec<i32>) -> Result<(), StoreError> {
        let mut tx = self.db.pool.begin().await?;

        // Only free seats flip; anything else means another writer got there first.
        let updated = sqlx::query_scalar::<_, i32>(
            r#"
            UPDATE seats
            SET is_booked = TRUE
            WHERE seat_id = ANY($1) AND is_booked = FALSE
            RETURNING seat_id
            "#,
        )
        .bind(&seat_ids)
        .fetch_all(&mut *tx)
        .await?;

        if updated.len() != seat_ids.len() {
            let unavailable: Vec<i32> = seat_ids
                .iter()
                .copied()
                .filter(|id| !updated.contains(id))
                .collect();
            warn!("seats {:?} were taken concurrently, rolling back", unavailable);
            if let Err(e) = tx.rollback().await {
                error!("failed to roll back booking transaction: {:?}", e);
            }
            return Err(StoreError::Conflict { seat_ids: unavailable });
        }

        tx.commit().await?;
        Ok(())
    }
}

impl SeatStore for PgSeatStore {
    fn seed(&self, seats: Vec<Seat>) -> StoreFuture<'_, u64> {
        Box::pin(self.seed_inner(seats))
    }

    fn count(&self) -> StoreFuture<'_, usize> {
        Box::pin(self.count_inner())
    }

    fn load_seats(&self) -> StoreFuture<'_, Vec<Seat>> {
        Box::pin(self.load_inner())
    }

    fn mark_booked(&self, seat_ids: Vec<i32>) -> StoreFuture<'_, ()> {
        Box::pin(self.mark_booked_inner(seat_ids))
    }
}
