use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

use crate::error::BookingError;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/book", post(book_seats))
        .route("/seats", get(get_seats))
}

/* ---------- BOOKING ---------- */

// POST /book
#[derive(Debug, Deserialize, Validate)]
pub struct BookRequest {
    #[validate(range(min = 1, max = 7))]
    pub seats: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BookResponse {
    pub message: String,
    pub seats: Vec<i32>,
}

async fn book_seats(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<BookRequest>, JsonRejection>,
) -> Result<impl IntoResponse, BookingError> {
    // Кривой JSON, нецелое или отсутствующее поле -> тот же 400, что и для плохого количества
    let Json(req) = payload.map_err(|e| {
        tracing::warn!("rejected booking payload: {}", e.body_text());
        BookingError::invalid_count()
    })?;
    req.validate().map_err(|_| BookingError::invalid_count())?;

    let seats = state.seat_map.allocate(req.seats).await?;

    Ok((
        StatusCode::OK,
        Json(BookResponse {
            message: "Seats booked successfully!".to_string(),
            seats,
        }),
    ))
}

/* ---------- SEATS ---------- */

// GET /seats
async fn get_seats(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, BookingError> {
    let snapshot = state.seat_map.snapshot().await?;
    Ok((StatusCode::OK, Json(snapshot)))
}
