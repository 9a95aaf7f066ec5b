use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum PlayerError {
    #[error("{message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    #[error("Player ID must be positive")]
    InvalidId,

    #[error("Player not found with ID: {0}")]
    NotFound(i64),

    #[error("Player not found with email: {0}")]
    EmailNotFound(String),

    #[error("Player with email {0} already exists")]
    DuplicateEmail(String),

    #[error("Jersey number {jersey_number} is already taken in team {team_name}")]
    JerseyTaken {
        jersey_number: i32,
        team_name: String,
    },

    #[error("Database error: {0}")]
    Database(String),
}

impl PlayerError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        PlayerError::Validation {
            field,
            message: message.into(),
        }
    }
}

pub type PlayerResult<T> = Result<T, PlayerError>;

impl From<PlayerError> for AppError {
    fn from(err: PlayerError) -> Self {
        let message = err.to_string();
        match err {
            PlayerError::Validation { .. } | PlayerError::InvalidId => AppError::BadRequest(message),
            PlayerError::NotFound(_) | PlayerError::EmailNotFound(_) => {
                AppError::NotFound(message)
            }
            PlayerError::DuplicateEmail(_) | PlayerError::JerseyTaken { .. } => {
                AppError::Conflict(message)
            }
            PlayerError::Database(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for PlayerError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}

impl From<sea_orm::DbErr> for PlayerError {
    fn from(err: sea_orm::DbErr) -> Self {
        PlayerError::Database(err.to_string())
    }
}
