use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::{error, warn};

use crate::repository::RepositoryError;
use crate::utils::response::error as error_response;
use crate::validation::ValidationError;

pub const USER_NOT_FOUND: &str = "User not found";
pub const INVALID_USER_ID: &str = "Invalid user id";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("{message}")]
    DatabaseError {
        message: &'static str,
        #[source]
        source: sqlx::Error,
    },
}

impl AppError {
    /// Classify a repository failure. `message` is the only text a caller sees
    /// when the store itself fails.
    pub fn from_repository(err: RepositoryError, message: &'static str) -> Self {
        match err {
            RepositoryError::NotFound(_) => AppError::NotFound(USER_NOT_FOUND.to_string()),
            RepositoryError::DuplicateEmail(_) => {
                AppError::ValidationError("Email is already in use".to_string())
            }
            RepositoryError::Database(source) => AppError::DatabaseError { message, source },
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::DatabaseError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::DatabaseError { .. } => "DATABASE_ERROR",
        }
    }

    fn log(&self) {
        match self {
            AppError::ValidationError(msg) | AppError::NotFound(msg) => {
                warn!(code = self.code(), message = %msg, "Request rejected");
            }
            AppError::DatabaseError { message, source } => {
                error!(code = self.code(), error = ?source, message = %message, "Database error");
            }
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::ValidationError(err.to_string())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::ValidationError(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        warn!(rejection = %rejection.body_text(), "Undecodable path segment");
        AppError::ValidationError(INVALID_USER_ID.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        self.log();

        // The database variant carries its fixed public message; the source stays in the log.
        let public_message = match self {
            AppError::ValidationError(msg) | AppError::NotFound(msg) => msg,
            AppError::DatabaseError { message, .. } => message.to_string(),
        };

        error_response(status, public_message)
    }
}
