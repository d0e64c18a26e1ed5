//! Feed operations: create, read, list, update, and delete posts.

use std::sync::Arc;

use uuid::Uuid;

use crate::assets::AssetLifecycle;
use crate::domain::{Post, User};
use crate::error::DomainError;
use crate::identity::ResolvedIdentity;
use crate::ports::{PostRepository, UserRepository};
use crate::validate;

/// Fixed feed window size.
pub const PAGE_SIZE: u64 = 2;

/// Input for creating a post.
#[derive(Debug, Clone)]
pub struct PostDraft {
    pub title: String,
    pub content: String,
    pub image_url: Option<String>,
}

/// Input for updating a post. Title and content always overwrite;
/// `image_url: None` is a typed "unchanged", keeping the prior value.
#[derive(Debug, Clone)]
pub struct PostPatch {
    pub title: String,
    pub content: String,
    pub image_url: Option<String>,
}

/// A post joined with its creator.
#[derive(Debug, Clone)]
pub struct AuthoredPost {
    pub post: Post,
    pub author: User,
}

/// One window over the feed plus the total count across all pages.
#[derive(Debug, Clone)]
pub struct FeedPage {
    pub posts: Vec<AuthoredPost>,
    pub total_posts: u64,
}

#[derive(Clone)]
pub struct FeedService {
    users: Arc<dyn UserRepository>,
    posts: Arc<dyn PostRepository>,
    assets: AssetLifecycle,
}

impl FeedService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        posts: Arc<dyn PostRepository>,
        assets: AssetLifecycle,
    ) -> Self {
        Self {
            users,
            posts,
            assets,
        }
    }

    /// Create a post owned by the caller.
    ///
    /// A resolved identity whose user record no longer exists is a stale
    /// credential and rejected as unauthenticated.
    pub async fn create_post(
        &self,
        identity: &ResolvedIdentity,
        draft: PostDraft,
    ) -> Result<AuthoredPost, DomainError> {
        let caller = identity.require()?;
        validate::validate_post_input(&draft.title, &draft.content)?;

        let mut owner = self
            .users
            .find_by_id(caller)
            .await?
            .ok_or(DomainError::Unauthenticated)?;

        let post = Post::new(owner.id, draft.title, draft.content, draft.image_url);
        let post = self.posts.insert(post).await?;

        // Second write of the user-post relation; not atomic with the first.
        // A crash in between leaves a dangling reference (see DESIGN.md).
        owner.posts.push(post.id);
        let owner = self.users.update(owner).await?;

        tracing::info!(post_id = %post.id, user_id = %owner.id, "post created");
        Ok(AuthoredPost {
            post,
            author: owner,
        })
    }

    /// One page of the feed, newest first, with creators populated.
    ///
    /// `page` counts from 1 and falls back to 1 when absent or zero.
    pub async fn list_posts(
        &self,
        identity: &ResolvedIdentity,
        page: Option<u64>,
    ) -> Result<FeedPage, DomainError> {
        identity.require()?;

        let page = match page {
            None | Some(0) => 1,
            Some(p) => p,
        };

        let total_posts = self.posts.count().await?;
        let rows = self
            .posts
            .find_page((page - 1) * PAGE_SIZE, PAGE_SIZE)
            .await?;

        let mut posts = Vec::with_capacity(rows.len());
        for post in rows {
            let author = self.author_of(&post).await?;
            posts.push(AuthoredPost { post, author });
        }

        Ok(FeedPage { posts, total_posts })
    }

    /// A single post with its creator. Reads are not ownership-restricted.
    pub async fn get_post(
        &self,
        identity: &ResolvedIdentity,
        id: Uuid,
    ) -> Result<AuthoredPost, DomainError> {
        identity.require()?;

        let post = self
            .posts
            .find_by_id(id)
            .await?
            .ok_or(DomainError::NotFound { entity: "post", id })?;
        let author = self.author_of(&post).await?;

        Ok(AuthoredPost { post, author })
    }

    /// Overwrite a post's title and content, and its image only when the
    /// patch carries a new one. Only the creator may update.
    pub async fn update_post(
        &self,
        identity: &ResolvedIdentity,
        id: Uuid,
        patch: PostPatch,
    ) -> Result<AuthoredPost, DomainError> {
        let caller = identity.require()?;
        validate::validate_post_input(&patch.title, &patch.content)?;

        let mut post = self
            .posts
            .find_by_id(id)
            .await?
            .ok_or(DomainError::NotFound { entity: "post", id })?;
        if post.creator != caller {
            return Err(DomainError::Forbidden);
        }

        post.title = patch.title;
        post.content = patch.content;
        if let Some(image_url) = patch.image_url {
            post.image_url = Some(image_url);
        }

        let post = self.posts.update(post).await?;
        let author = self.author_of(&post).await?;

        Ok(AuthoredPost { post, author })
    }

    /// Delete a post. Only the creator may delete.
    ///
    /// Cascade: the current image file is scheduled for deletion, the post
    /// record removed, and the id pulled from the owner's post list. The
    /// latter two writes are not atomic (see DESIGN.md).
    pub async fn delete_post(
        &self,
        identity: &ResolvedIdentity,
        id: Uuid,
    ) -> Result<(), DomainError> {
        let caller = identity.require()?;

        let post = self
            .posts
            .find_by_id(id)
            .await?
            .ok_or(DomainError::NotFound { entity: "post", id })?;
        if post.creator != caller {
            return Err(DomainError::Forbidden);
        }

        if let Some(image_url) = &post.image_url {
            self.assets.discard(image_url).await;
        }

        self.posts.delete(id).await?;

        if let Some(mut owner) = self.users.find_by_id(caller).await? {
            owner.posts.retain(|post_id| *post_id != id);
            self.users.update(owner).await?;
        }

        tracing::info!(post_id = %id, user_id = %caller, "post deleted");
        Ok(())
    }

    async fn author_of(&self, post: &Post) -> Result<User, DomainError> {
        self.users
            .find_by_id(post.creator)
            .await?
            .ok_or(DomainError::NotFound {
                entity: "user",
                id: post.creator,
            })
    }
}
