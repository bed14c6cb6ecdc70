use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum AppError {
    #[error("Empty input: {0}")]
    EmptyInput(String),

    #[error("Generation failed: {0}")]
    GenerationFailed(String),

    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    #[error("Session exhausted: {0}")]
    SessionExhausted(String),

    #[error("Session not prepared: {0}")]
    SessionNotPrepared(String),

    #[error("No current item: {0}")]
    NoCurrentItem(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::EmptyInput(_) => "EMPTY_INPUT",
            AppError::GenerationFailed(_) => "GENERATION_FAILED",
            AppError::InvariantViolation(_) => "INVARIANT_VIOLATION",
            AppError::SessionExhausted(_) => "SESSION_EXHAUSTED",
            AppError::SessionNotPrepared(_) => "SESSION_NOT_PREPARED",
            AppError::NoCurrentItem(_) => "NO_CURRENT_ITEM",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::DatabaseError(_) => "DATABASE_ERROR",
            AppError::InternalError(_) => "INTERNAL_ERROR",
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
    pub kind: &'static str,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::EmptyInput(_) => StatusCode::BAD_REQUEST,
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::SessionExhausted(_) => StatusCode::CONFLICT,
            AppError::SessionNotPrepared(_) => StatusCode::CONFLICT,
            AppError::NoCurrentItem(_) => StatusCode::CONFLICT,
            AppError::InvariantViolation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::GenerationFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.to_string(),
            code: self.status_code().as_u16(),
            kind: self.error_code(),
        })
    }
}
impl From<mongodb::error::Error> for AppError {
    fn from(err: mongodb::error::Error) -> Self {
        AppError::DatabaseError(err.to_string())
    }
}
impl From<mongodb::bson::ser::Error> for AppError {
    fn from(err: mongodb::bson::ser::Error) -> Self {
        AppError::InternalError(format!("BSON serialization error: {}", err))
    }
}
impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::GenerationFailed(err.to_string())
    }
}
impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::ValidationError(err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(
            AppError::EmptyInput("texte".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::GenerationFailed("engine".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::SessionExhausted("test".into()).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::InvariantViolation("test".into()).status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            AppError::NotFound("test".into()).status_code(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_error_messages() {
        let err = AppError::NotFound("session".into());
        assert_eq!(err.to_string(), "Not found: session");
        assert_eq!(err.error_code(), "NOT_FOUND");
    }

    #[test]
    fn test_generation_failure_is_distinct_from_parse_outcome() {
        let err = AppError::GenerationFailed("connection refused".into());
        assert_eq!(err.error_code(), "GENERATION_FAILED");
        assert_eq!(err.to_string(), "Generation failed: connection refused");
    }
}
