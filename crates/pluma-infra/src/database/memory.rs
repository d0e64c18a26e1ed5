//! In-memory repositories.
//!
//! The fallback store when no database is configured, and the store the
//! service tests run against. Data is lost on process restart.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use pluma_core::domain::{Post, User};
use pluma_core::error::RepoError;
use pluma_core::ports::{PostRepository, UserRepository};

/// In-memory user store over an async RwLock.
pub struct InMemoryUserRepository {
    rows: RwLock<HashMap<Uuid, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        Ok(self.rows.read().await.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        Ok(self
            .rows
            .read()
            .await
            .values()
            .find(|user| user.email == email)
            .cloned())
    }

    async fn insert(&self, user: User) -> Result<User, RepoError> {
        let mut rows = self.rows.write().await;
        if rows.values().any(|existing| existing.email == user.email) {
            return Err(RepoError::Constraint("entity already exists".to_string()));
        }
        rows.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update(&self, mut user: User) -> Result<User, RepoError> {
        let mut rows = self.rows.write().await;
        if !rows.contains_key(&user.id) {
            return Err(RepoError::NotFound);
        }
        user.updated_at = Utc::now();
        rows.insert(user.id, user.clone());
        Ok(user)
    }
}

/// In-memory post store. An insertion sequence number breaks creation-time
/// ties so the feed ordering stays deterministic.
pub struct InMemoryPostRepository {
    rows: RwLock<HashMap<Uuid, (u64, Post)>>,
    next_seq: AtomicU64,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(HashMap::new()),
            next_seq: AtomicU64::new(0),
        }
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        Ok(self.rows.read().await.get(&id).map(|(_, post)| post.clone()))
    }

    async fn insert(&self, post: Post) -> Result<Post, RepoError> {
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        self.rows.write().await.insert(post.id, (seq, post.clone()));
        Ok(post)
    }

    async fn update(&self, mut post: Post) -> Result<Post, RepoError> {
        let mut rows = self.rows.write().await;
        let Some((seq, _)) = rows.get(&post.id) else {
            return Err(RepoError::NotFound);
        };
        let seq = *seq;
        post.updated_at = Utc::now();
        rows.insert(post.id, (seq, post.clone()));
        Ok(post)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut rows = self.rows.write().await;
        if rows.remove(&id).is_none() {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }

    async fn find_page(&self, offset: u64, limit: u64) -> Result<Vec<Post>, RepoError> {
        let rows = self.rows.read().await;
        let mut all: Vec<&(u64, Post)> = rows.values().collect();
        all.sort_by(|a, b| (b.1.created_at, b.0).cmp(&(a.1.created_at, a.0)));

        Ok(all
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .map(|(_, post)| post.clone())
            .collect())
    }

    async fn count(&self) -> Result<u64, RepoError> {
        Ok(self.rows.read().await.len() as u64)
    }
}
