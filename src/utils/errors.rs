//! Error handling for Evently
//!
//! This module defines the main error type used throughout the application
//! and its mapping onto HTTP responses at the request boundary.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use crate::models::event::EventStatus;

/// Main error type for the Evently application
#[derive(Error, Debug)]
pub enum EventlyError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("You can only manage your own events")]
    PermissionDenied,

    #[error("Event not found")]
    EventNotFound { event_id: i64 },

    #[error("Cannot book past or cancelled events")]
    EventNotBookable { status: EventStatus },

    #[error("No free seats")]
    SeatsExhausted { event_id: i64 },

    #[error("You are already registered")]
    AlreadyBooked,

    #[error("You were not registered")]
    NotRegistered,

    #[error("You can only rate an event after it has taken place")]
    RatingNotOpen,

    #[error("You did not attend this event")]
    RatingWithoutBooking,

    #[error("Rate the event from 1 to 5")]
    InvalidScore,

    #[error("Tag already exists")]
    DuplicateTag,

    #[error("Deletion is only possible within 1 hour of creation")]
    DeleteWindowExpired,

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for Evently operations
pub type Result<T> = std::result::Result<T, EventlyError>;

impl EventlyError {
    /// HTTP status the error surfaces as at the request boundary.
    pub fn status_code(&self) -> StatusCode {
        match self {
            EventlyError::EventNotFound { .. } => StatusCode::NOT_FOUND,
            EventlyError::Authentication(_) => StatusCode::UNAUTHORIZED,
            EventlyError::PermissionDenied | EventlyError::DeleteWindowExpired => {
                StatusCode::FORBIDDEN
            }
            EventlyError::EventNotBookable { .. }
            | EventlyError::SeatsExhausted { .. }
            | EventlyError::AlreadyBooked
            | EventlyError::NotRegistered
            | EventlyError::RatingNotOpen
            | EventlyError::RatingWithoutBooking
            | EventlyError::InvalidScore
            | EventlyError::DuplicateTag
            | EventlyError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            EventlyError::Database(_)
            | EventlyError::Migration(_)
            | EventlyError::Config(_)
            | EventlyError::Serialization(_)
            | EventlyError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for EventlyError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Caller errors carry their message; anything unexpected is logged
        // server-side and surfaced without internal detail.
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "Request failed");
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_errors_map_to_client_statuses() {
        assert_eq!(
            EventlyError::EventNotFound { event_id: 1 }.status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            EventlyError::SeatsExhausted { event_id: 1 }.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            EventlyError::AlreadyBooked.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            EventlyError::DeleteWindowExpired.status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            EventlyError::Authentication("missing token".into()).status_code(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn test_infrastructure_errors_map_to_500() {
        let err = EventlyError::Config("bad config".into());
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
