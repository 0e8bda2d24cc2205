pub mod config;
pub mod controllers;
pub mod database;
pub mod error;
pub mod models;
pub mod services;
pub mod storage;

use std::sync::Arc;
use tracing::{info, warn};

use services::seat_map::SeatMap;
use storage::{MemorySeatStore, PgSeatStore, SeatStore};

// Shared state для всего приложения
pub struct AppState {
    pub seat_map: SeatMap,
    pub config: config::Config,
}

impl AppState {
    pub async fn new(config: config::Config) -> anyhow::Result<Arc<Self>> {
        let store: Arc<dyn SeatStore> = match config.database.url.as_deref() {
            Some(url) => {
                let db = database::Database::new(url, &config.database).await?;
                info!("Database connected");
                db.run_migrations().await?;
                Arc::new(PgSeatStore::new(db))
            }
            None => {
                warn!("DATABASE_URL is not set, bookings are kept in memory only");
                Arc::new(MemorySeatStore::new())
            }
        };

        Self::with_store(store, config).await
    }

    /// State over an already built store; the coach layout is seeded here.
    pub async fn with_store(store: Arc<dyn SeatStore>, config: config::Config) -> anyhow::Result<Arc<Self>> {
        let seat_map = SeatMap::new(store);
        seat_map.initialize().await?;

        Ok(Arc::new(Self { seat_map, config }))
    }
}
