pub mod bookings;

use axum::{extract::State, routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().merge(bookings::routes())
}

/// Full HTTP surface with state attached, ready to serve.
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(banner))
        .route("/health", get(|| async { "OK" }))
        .merge(routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

async fn banner(State(state): State<Arc<AppState>>) -> String {
    format!("Train Booking API v1.0 ({})", state.config.app.environment)
}
