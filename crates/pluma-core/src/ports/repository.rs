use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Post, User};
use crate::error::RepoError;

/// User repository. Users are only ever created and updated; the domain
/// never deletes an account.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by their unique ID.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError>;

    /// Find a user by their email address. Matching is exact, case-sensitive
    /// as stored.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;

    /// Insert a new user. Fails with `Constraint` when the email is taken.
    async fn insert(&self, user: User) -> Result<User, RepoError>;

    /// Overwrite an existing user. The store re-stamps `updated_at`.
    async fn update(&self, user: User) -> Result<User, RepoError>;
}

/// Post repository, including the feed page query.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Find a post by its unique ID.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError>;

    /// Insert a new post.
    async fn insert(&self, post: Post) -> Result<Post, RepoError>;

    /// Overwrite an existing post. The store re-stamps `updated_at`.
    async fn update(&self, post: Post) -> Result<Post, RepoError>;

    /// Delete a post by its ID.
    async fn delete(&self, id: Uuid) -> Result<(), RepoError>;

    /// A window over all posts ordered by creation time, newest first.
    async fn find_page(&self, offset: u64, limit: u64) -> Result<Vec<Post>, RepoError>;

    /// Total number of posts across all pages.
    async fn count(&self) -> Result<u64, RepoError>;
}
