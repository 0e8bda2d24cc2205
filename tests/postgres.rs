//! Runs against a real Postgres. Set `TEST_DATABASE_URL` and use
//! `cargo test -- --ignored`.
#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;

use futures::future::join_all;
use train_booking::config::DatabaseConfig;
use train_booking::database::Database;
use train_booking::error::StoreError;
use train_booking::services::seat_map::SeatMap;
use train_booking::storage::{PgSeatStore, SeatStore};

async fn store() -> PgSeatStore {
    let url = std::env::var("TEST_DATABASE_URL").expect("TEST_DATABASE_URL must be set");
    let config = DatabaseConfig {
        url: Some(url.clone()),
        pool_size: 5,
        acquire_timeout_secs: 5,
    };
    let db = Database::new(&url, &config).await.unwrap();
    db.run_migrations().await.unwrap();
    sqlx::query("TRUNCATE seats").execute(&db.pool).await.unwrap();
    PgSeatStore::new(db)
}

// Both scenarios share one table, so they run inside a single test.
#[tokio::test]
#[ignore]
async fn postgres_store_books_atomically() {
    let store = Arc::new(store().await);
    let map = Arc::new(SeatMap::new(store.clone()));

    map.initialize().await.unwrap();
    map.initialize().await.unwrap();
    assert_eq!(store.count().await.unwrap(), 80);

    assert_eq!(map.allocate(3).await.unwrap(), vec![1, 2, 3]);

    // direct conflicting commit is rejected as a whole
    let err = store.mark_booked(vec![3, 4]).await.unwrap_err();
    assert!(matches!(err, StoreError::Conflict { ref seat_ids } if seat_ids == &vec![3]));
    let seats = store.load_seats().await.unwrap();
    assert!(!seats.iter().find(|s| s.seat_id == 4).unwrap().is_booked);

    let results = join_all((0..30).map(|_| {
        let map = map.clone();
        async move { map.allocate(4).await }
    }))
    .await;
    let mut ids: Vec<i32> = results.into_iter().filter_map(Result::ok).flatten().collect();
    let booked = ids.len();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), booked);
    assert_eq!(map.snapshot().await.unwrap().booked_seats(), booked + 3);
}
