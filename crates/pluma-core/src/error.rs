//! Domain-level error types.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// A single field-level validation failure.
///
/// Operations that validate input collect every violation before failing,
/// so clients receive the complete list in one response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub message: String,
}

impl ValidationIssue {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Domain errors - business logic failures.
///
/// One closed shape for every operation: the variant is the kind, the
/// payload is the data, and `code` exposes the numeric classification the
/// transport layer maps to a status.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("caller is not authenticated")]
    Unauthenticated,

    #[error("invalid input")]
    Validation(Vec<ValidationIssue>),

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: Uuid },

    #[error("caller does not own this resource")]
    Forbidden,

    #[error("{0}")]
    Conflict(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl DomainError {
    /// Numeric classification carried as data on the failure.
    pub fn code(&self) -> u16 {
        match self {
            DomainError::Unauthenticated => 401,
            DomainError::Validation(_) => 422,
            DomainError::NotFound { .. } => 404,
            DomainError::Forbidden => 403,
            DomainError::Conflict(_) => 409,
            DomainError::Internal(_) => 500,
        }
    }
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("store connection failed: {0}")]
    Connection(String),

    #[error("query execution failed: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,

    #[error("constraint violation: {0}")]
    Constraint(String),
}

impl From<RepoError> for DomainError {
    fn from(err: RepoError) -> Self {
        match err {
            // Services perform their own existence checks; a NotFound
            // surfacing from a mutation means the row vanished mid-operation.
            RepoError::NotFound => DomainError::Internal("entity disappeared mid-operation".into()),
            RepoError::Constraint(msg) => DomainError::Conflict(msg),
            RepoError::Connection(msg) | RepoError::Query(msg) => DomainError::Internal(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_follow_the_taxonomy() {
        assert_eq!(DomainError::Unauthenticated.code(), 401);
        assert_eq!(DomainError::Forbidden.code(), 403);
        assert_eq!(
            DomainError::NotFound {
                entity: "post",
                id: Uuid::new_v4()
            }
            .code(),
            404
        );
        assert_eq!(DomainError::Validation(vec![]).code(), 422);
        assert_eq!(DomainError::Conflict("dup".into()).code(), 409);
        assert_eq!(DomainError::Internal("boom".into()).code(), 500);
    }

    #[test]
    fn constraint_violations_become_conflicts() {
        let err: DomainError = RepoError::Constraint("email taken".into()).into();
        assert!(matches!(err, DomainError::Conflict(_)));
    }
}
