//! Authentication ports.

use uuid::Uuid;

/// Claims carried by a session token.
#[derive(Debug, Clone)]
pub struct TokenClaims {
    pub user_id: Uuid,
    pub email: String,
    pub exp: i64,
}

/// Token service for issuing and verifying signed session tokens.
pub trait TokenService: Send + Sync {
    /// Sign a `{userId, email}` payload, valid for the configured TTL.
    fn issue(&self, user_id: Uuid, email: &str) -> Result<String, AuthError>;

    /// Verify a token and decode its claims. Fails for malformed, tampered,
    /// or expired tokens.
    fn verify(&self, token: &str) -> Result<TokenClaims, AuthError>;
}

/// Password hashing service.
pub trait PasswordService: Send + Sync {
    /// Hash a plain text password. One-way, salted.
    fn hash(&self, password: &str) -> Result<String, AuthError>;

    /// Verify a password against a hash via the scheme's own verify routine.
    /// Plaintext is never compared directly.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError>;
}

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("token expired")]
    TokenExpired,

    #[error("invalid token: {0}")]
    InvalidToken(String),

    #[error("hashing error: {0}")]
    Hashing(String),
}

impl From<AuthError> for crate::error::DomainError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::TokenExpired | AuthError::InvalidToken(_) => {
                crate::error::DomainError::Unauthenticated
            }
            AuthError::Hashing(msg) => crate::error::DomainError::Internal(msg),
        }
    }
}
