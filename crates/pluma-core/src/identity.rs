//! Request-scoped caller identity.

use uuid::Uuid;

use crate::error::DomainError;

/// The outcome of resolving a bearer token, computed once per request and
/// threaded explicitly into every operation. Never process-global.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedIdentity {
    user_id: Option<Uuid>,
}

impl ResolvedIdentity {
    /// A caller that presented a valid, unexpired token.
    pub fn authenticated(user_id: Uuid) -> Self {
        Self {
            user_id: Some(user_id),
        }
    }

    /// A caller that presented no token. Rejection is deferred to each
    /// operation, not decided here.
    pub fn anonymous() -> Self {
        Self { user_id: None }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user_id.is_some()
    }

    pub fn user_id(&self) -> Option<Uuid> {
        self.user_id
    }

    /// The caller's user id, or `Unauthenticated` for anonymous callers.
    pub fn require(&self) -> Result<Uuid, DomainError> {
        self.user_id.ok_or(DomainError::Unauthenticated)
    }
}
