//! Error handling - every failure becomes an `{"error": ...}` body.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use masterblog_core::error::{DomainError, RepoError};
use masterblog_shared::ErrorResponse;
use std::fmt;

/// Application-level error type that converts to JSON error responses.
#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    BadRequest(String),
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error = match self {
            AppError::NotFound(detail) | AppError::BadRequest(detail) => {
                ErrorResponse::new(detail.as_str())
            }
            AppError::Internal(detail) => {
                // Log internal errors, never return them
                tracing::error!("Internal error: {}", detail);
                ErrorResponse::internal_error()
            }
        };

        HttpResponse::build(self.status_code()).json(error)
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        if err.is_not_found() {
            AppError::NotFound(err.to_string())
        } else {
            AppError::BadRequest(err.to_string())
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Domain(err) => err.into(),
            RepoError::MalformedDocument(msg) => {
                AppError::Internal(format!("Posts document error: {}", msg))
            }
            RepoError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;
