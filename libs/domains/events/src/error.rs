use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

/// Event domain errors. Display is the client-facing message.
#[derive(Debug, Error, PartialEq)]
pub enum EventError {
    #[error("{0}")]
    Validation(String),

    #[error("Event not found with ID: {0}")]
    NotFound(i64),

    #[error("Event name already exists: {0}")]
    DuplicateName(String),

    #[error("You can't cancel an event less than 24 hours before it starts.")]
    CancellationWindow,

    /// Raised while resolving `team_a_id` / `team_b_id` of a request
    #[error("Team not found with ID: {0}")]
    TeamNotFound(i64),

    #[error("{0}")]
    Database(String),
}

impl EventError {
    pub fn validation(message: impl Into<String>) -> Self {
        EventError::Validation(message.into())
    }
}

pub type EventResult<T> = Result<T, EventError>;

impl From<EventError> for AppError {
    fn from(err: EventError) -> Self {
        let message = err.to_string();
        match err {
            EventError::Validation(_) => AppError::BadRequest(message),
            EventError::CancellationWindow => AppError::BusinessRule(message),
            EventError::NotFound(_) | EventError::TeamNotFound(_) => AppError::NotFound(message),
            EventError::DuplicateName(_) => AppError::Conflict(message),
            EventError::Database(_) => AppError::InternalServerError(message),
        }
    }
}

impl IntoResponse for EventError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}

impl From<sea_orm::DbErr> for EventError {
    fn from(err: sea_orm::DbErr) -> Self {
        EventError::Database(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (EventError::validation("Event name is required"), StatusCode::BAD_REQUEST),
            (EventError::CancellationWindow, StatusCode::BAD_REQUEST),
            (EventError::NotFound(1), StatusCode::NOT_FOUND),
            (EventError::TeamNotFound(1), StatusCode::NOT_FOUND),
            (EventError::DuplicateName("Finale".into()), StatusCode::CONFLICT),
            (EventError::Database("pool closed".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }

    #[test]
    fn test_database_message_is_unmodified() {
        let err = EventError::from(sea_orm::DbErr::Custom("duplicate key".into()));
        assert!(matches!(err, EventError::Database(ref m) if m.contains("duplicate key")));
    }
}
