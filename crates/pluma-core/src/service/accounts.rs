//! Account operations: register, login, current user, status updates.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::User;
use crate::error::DomainError;
use crate::identity::ResolvedIdentity;
use crate::ports::{PasswordService, TokenService, UserRepository};
use crate::validate;

/// Input for the public register operation.
#[derive(Debug, Clone)]
pub struct Registration {
    pub email: String,
    pub name: String,
    pub password: String,
}

/// A freshly issued session: the signed token and the account it names.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub user_id: Uuid,
}

#[derive(Clone)]
pub struct AccountService {
    users: Arc<dyn UserRepository>,
    passwords: Arc<dyn PasswordService>,
    tokens: Arc<dyn TokenService>,
}

impl AccountService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        passwords: Arc<dyn PasswordService>,
        tokens: Arc<dyn TokenService>,
    ) -> Self {
        Self {
            users,
            passwords,
            tokens,
        }
    }

    /// Register a new account. Public.
    ///
    /// A duplicate email is a `Conflict`, checked here before the insert and
    /// backed by the store's unique constraint.
    pub async fn register(&self, input: Registration) -> Result<User, DomainError> {
        validate::validate_registration(&input.email, &input.password)?;

        if self.users.find_by_email(&input.email).await?.is_some() {
            return Err(DomainError::Conflict("email is already registered".into()));
        }

        let password_hash = self.passwords.hash(&input.password)?;
        let user = User::new(input.email, input.name, password_hash);

        tracing::info!(user_id = %user.id, "registering new account");
        Ok(self.users.insert(user).await?)
    }

    /// Exchange credentials for a session token. Public.
    ///
    /// Unknown email and wrong password are indistinguishable to the caller.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, DomainError> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or(DomainError::Unauthenticated)?;

        if !self.passwords.verify(password, &user.password_hash)? {
            return Err(DomainError::Unauthenticated);
        }

        let token = self.tokens.issue(user.id, &user.email)?;
        Ok(Session {
            token,
            user_id: user.id,
        })
    }

    /// The caller's own user record.
    pub async fn current_user(&self, identity: &ResolvedIdentity) -> Result<User, DomainError> {
        let caller = identity.require()?;
        self.users
            .find_by_id(caller)
            .await?
            .ok_or(DomainError::NotFound {
                entity: "user",
                id: caller,
            })
    }

    /// Overwrite the caller's free-text status.
    pub async fn update_status(
        &self,
        identity: &ResolvedIdentity,
        status: String,
    ) -> Result<User, DomainError> {
        let caller = identity.require()?;
        let mut user = self
            .users
            .find_by_id(caller)
            .await?
            .ok_or(DomainError::NotFound {
                entity: "user",
                id: caller,
            })?;

        user.status = status;
        Ok(self.users.update(user).await?)
    }
}
