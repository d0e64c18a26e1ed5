//! Error handling - RFC 7807 compliant responses.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use std::fmt;

use pluma_core::error::{DomainError, RepoError, ValidationIssue};
use pluma_core::ports::{AssetError, AuthError};
use pluma_shared::ErrorResponse;

/// Application-level error type that converts to RFC 7807 responses.
///
/// Mirrors the domain taxonomy one-to-one so every predictable failure maps
/// to an explicit status; `Auth` carries token failures from the guard with
/// their own response detail.
#[derive(Debug)]
pub enum AppError {
    Unauthenticated,
    Validation(Vec<ValidationIssue>),
    NotFound(String),
    Forbidden,
    Conflict(String),
    Auth(AuthError),
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Unauthenticated => write!(f, "Unauthenticated"),
            AppError::Validation(issues) => write!(f, "Validation failed: {} issue(s)", issues.len()),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::Forbidden => write!(f, "Forbidden"),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::Auth(err) => write!(f, "Authentication failed: {}", err),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthenticated | AppError::Auth(_) => StatusCode::UNAUTHORIZED,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error = match self {
            AppError::Unauthenticated => ErrorResponse::unauthorized()
                .with_detail("Please provide a valid Bearer token in the Authorization header."),
            AppError::Validation(issues) => ErrorResponse::new(422, "Validation Failed")
                .with_errors(issues.iter().map(|i| i.message.clone()).collect()),
            AppError::NotFound(detail) => ErrorResponse::not_found(detail.clone()),
            AppError::Forbidden => ErrorResponse::forbidden(),
            AppError::Conflict(detail) => ErrorResponse::conflict(detail.clone()),
            AppError::Auth(err) => match err {
                AuthError::TokenExpired => ErrorResponse::new(401, "Token Expired")
                    .with_detail("Your authentication token has expired. Please login again."),
                AuthError::InvalidToken(msg) => {
                    ErrorResponse::new(401, "Invalid Token").with_detail(msg.clone())
                }
                AuthError::Hashing(_) => ErrorResponse::internal_error(),
            },
            AppError::Internal(detail) => {
                // Log internal errors
                tracing::error!("Internal error: {}", detail);
                ErrorResponse::internal_error()
            }
        };

        HttpResponse::build(self.status_code()).json(error)
    }
}

// Conversion from domain errors
impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Unauthenticated => AppError::Unauthenticated,
            DomainError::Validation(issues) => AppError::Validation(issues),
            DomainError::NotFound { entity, id } => {
                AppError::NotFound(format!("{} with id {} not found", entity, id))
            }
            DomainError::Forbidden => AppError::Forbidden,
            DomainError::Conflict(msg) => AppError::Conflict(msg),
            DomainError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        AppError::from(DomainError::from(err))
    }
}

impl From<AssetError> for AppError {
    fn from(err: AssetError) -> Self {
        AppError::Internal(err.to_string())
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;
