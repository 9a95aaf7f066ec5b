use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use domain_players::PlayerError;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum TeamError {
    #[error("{message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    #[error("Team ID must be positive")]
    InvalidId,

    #[error("Team not found with ID: {0}")]
    NotFound(i64),

    #[error("Team name already exists: {0}")]
    DuplicateName(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl TeamError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        TeamError::Validation {
            field,
            message: message.into(),
        }
    }
}

pub type TeamResult<T> = Result<T, TeamError>;

impl From<TeamError> for AppError {
    fn from(err: TeamError) -> Self {
        let message = err.to_string();
        match err {
            TeamError::Validation { .. } | TeamError::InvalidId => AppError::BadRequest(message),
            TeamError::NotFound(_) => AppError::NotFound(message),
            TeamError::DuplicateName(_) => AppError::Conflict(message),
            TeamError::Database(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for TeamError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}

impl From<sea_orm::DbErr> for TeamError {
    fn from(err: sea_orm::DbErr) -> Self {
        TeamError::Database(err.to_string())
    }
}

// Roster loading goes through the player store
impl From<PlayerError> for TeamError {
    fn from(err: PlayerError) -> Self {
        match err {
            PlayerError::Database(msg) => TeamError::Database(msg),
            other => TeamError::Database(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (TeamError::InvalidId, StatusCode::BAD_REQUEST),
            (TeamError::NotFound(3), StatusCode::NOT_FOUND),
            (TeamError::DuplicateName("G2".into()), StatusCode::CONFLICT),
            (TeamError::Database("down".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }

    #[test]
    fn test_messages() {
        assert_eq!(TeamError::NotFound(3).to_string(), "Team not found with ID: 3");
        assert_eq!(
            TeamError::DuplicateName("G2".into()).to_string(),
            "Team name already exists: G2"
        );
    }
}
