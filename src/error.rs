use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

pub const INVALID_COUNT_MESSAGE: &str =
    "Invalid number of seats requested. You can book between 1 and 7 seats.";
pub const NOT_ENOUGH_SEATS_MESSAGE: &str = "Not enough seats available.";

/// Errors raised by a [`crate::storage::SeatStore`] backend.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// One of the seats was already booked when the commit ran.
    #[error("seats {seat_ids:?} are no longer free")]
    Conflict { seat_ids: Vec<i32> },

    #[error("seat store lock poisoned")]
    Poisoned,
}

#[derive(Debug, Error)]
pub enum BookingError {
    #[error("{0}")]
    InvalidRequest(String),

    #[error("not enough seats available: requested {requested}, free {available}")]
    InsufficientCapacity { requested: usize, available: usize },

    #[error("storage error: {0}")]
    Storage(#[from] StoreError),
}

impl BookingError {
    pub fn invalid_count() -> Self {
        BookingError::InvalidRequest(INVALID_COUNT_MESSAGE.to_string())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            BookingError::InvalidRequest(_) | BookingError::InsufficientCapacity { .. } => {
                StatusCode::BAD_REQUEST
            }
            BookingError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message shown to API clients.
    pub fn public_message(&self) -> String {
        match self {
            BookingError::InvalidRequest(msg) => msg.clone(),
            BookingError::InsufficientCapacity { .. } => NOT_ENOUGH_SEATS_MESSAGE.to_string(),
            BookingError::Storage(_) => "Internal storage error".to_string(),
        }
    }
}

impl IntoResponse for BookingError {
    fn into_response(self) -> Response {
        if let BookingError::Storage(ref e) = self {
            tracing::error!("booking storage failure: {:?}", e);
        }
        (self.status_code(), Json(json!({ "error": self.public_message() }))).into_response()
    }
}
