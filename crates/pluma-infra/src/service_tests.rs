//! Service-level tests: the content API exercised end to end over the
//! in-memory store with the real password and token services.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use uuid::Uuid;

use pluma_core::assets::AssetLifecycle;
use pluma_core::domain::User;
use pluma_core::error::DomainError;
use pluma_core::identity::ResolvedIdentity;
use pluma_core::ports::{
    AssetError, AssetStore, PasswordService, PostRepository, TokenService, UserRepository,
};
use pluma_core::service::{
    AccountService, FeedService, PAGE_SIZE, PostDraft, PostPatch, Registration,
};

use crate::auth::{Argon2PasswordService, JwtConfig, JwtTokenService};
use crate::database::{InMemoryPostRepository, InMemoryUserRepository};

/// Asset store double that records every deletion intent.
#[derive(Default)]
struct RecordingAssetStore {
    deleted: Mutex<Vec<String>>,
}

#[async_trait]
impl AssetStore for RecordingAssetStore {
    async fn save(&self, filename: &str, _bytes: &[u8]) -> Result<String, AssetError> {
        Ok(format!("images/{filename}"))
    }

    async fn delete(&self, path: &str) -> Result<(), AssetError> {
        self.deleted.lock().unwrap().push(path.to_string());
        Ok(())
    }
}

struct Harness {
    accounts: AccountService,
    feed: FeedService,
    users: Arc<InMemoryUserRepository>,
    posts: Arc<InMemoryPostRepository>,
    tokens: Arc<JwtTokenService>,
    assets: Arc<RecordingAssetStore>,
}

fn harness() -> Harness {
    let users = Arc::new(InMemoryUserRepository::new());
    let posts = Arc::new(InMemoryPostRepository::new());
    let tokens = Arc::new(JwtTokenService::new(JwtConfig {
        secret: "test-secret-key".to_string(),
        ttl_hours: 1,
        issuer: "test-issuer".to_string(),
    }));
    let passwords: Arc<dyn PasswordService> = Arc::new(Argon2PasswordService::new());
    let assets = Arc::new(RecordingAssetStore::default());

    let accounts = AccountService::new(users.clone(), passwords, tokens.clone());
    let feed = FeedService::new(
        users.clone(),
        posts.clone(),
        AssetLifecycle::new(assets.clone()),
    );

    Harness {
        accounts,
        feed,
        users,
        posts,
        tokens,
        assets,
    }
}

fn registration(email: &str, name: &str) -> Registration {
    Registration {
        email: email.to_string(),
        name: name.to_string(),
        password: "correct horse".to_string(),
    }
}

async fn signed_up(h: &Harness, email: &str, name: &str) -> (User, ResolvedIdentity) {
    let user = h.accounts.register(registration(email, name)).await.unwrap();
    let identity = ResolvedIdentity::authenticated(user.id);
    (user, identity)
}

fn draft(title: &str, image_url: Option<&str>) -> PostDraft {
    PostDraft {
        title: title.to_string(),
        content: "Some long enough content".to_string(),
        image_url: image_url.map(String::from),
    }
}

mod accounts {
    use super::*;

    #[tokio::test]
    async fn register_rejects_duplicate_email_with_conflict() {
        let h = harness();
        h.accounts
            .register(registration("reader@example.com", "Reader"))
            .await
            .unwrap();

        let err = h
            .accounts
            .register(registration("reader@example.com", "Impostor"))
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::Conflict(_)));
        assert_eq!(err.code(), 409);
    }

    #[tokio::test]
    async fn register_reports_short_passwords() {
        let h = harness();
        let err = h
            .accounts
            .register(Registration {
                email: "reader@example.com".into(),
                name: "Reader".into(),
                password: "abc".into(),
            })
            .await
            .unwrap_err();

        let DomainError::Validation(issues) = err else {
            panic!("expected a validation error");
        };
        assert!(issues.iter().any(|i| i.message.contains("password")));
    }

    #[tokio::test]
    async fn register_never_stores_the_plaintext_password() {
        let h = harness();
        let user = h
            .accounts
            .register(registration("reader@example.com", "Reader"))
            .await
            .unwrap();

        assert_ne!(user.password_hash, "correct horse");

        let stored = h
            .users
            .find_by_email("reader@example.com")
            .await
            .unwrap()
            .unwrap();
        assert_ne!(stored.password_hash, "correct horse");
        assert_eq!(stored.status, pluma_core::domain::DEFAULT_STATUS);
        assert_eq!(stored.id, user.id);
    }

    #[tokio::test]
    async fn login_rejects_unknown_email_and_wrong_password_alike() {
        let h = harness();
        h.accounts
            .register(registration("reader@example.com", "Reader"))
            .await
            .unwrap();

        let unknown = h
            .accounts
            .login("stranger@example.com", "correct horse")
            .await
            .unwrap_err();
        assert_eq!(unknown.code(), 401);

        let wrong = h
            .accounts
            .login("reader@example.com", "battery staple")
            .await
            .unwrap_err();
        assert_eq!(wrong.code(), 401);
    }

    #[tokio::test]
    async fn login_token_verifies_back_to_the_same_account() {
        let h = harness();
        let user = h
            .accounts
            .register(registration("reader@example.com", "Reader"))
            .await
            .unwrap();

        let session = h
            .accounts
            .login("reader@example.com", "correct horse")
            .await
            .unwrap();
        assert_eq!(session.user_id, user.id);

        let claims = h.tokens.verify(&session.token).unwrap();
        assert_eq!(claims.user_id, user.id);
        assert_eq!(claims.email, "reader@example.com");
    }

    #[tokio::test]
    async fn current_user_requires_authentication() {
        let h = harness();
        let err = h
            .accounts
            .current_user(&ResolvedIdentity::anonymous())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Unauthenticated));
    }

    #[tokio::test]
    async fn update_status_overwrites_the_status_line() {
        let h = harness();
        let (_, identity) = signed_up(&h, "reader@example.com", "Reader").await;

        let user = h
            .accounts
            .update_status(&identity, "Writing again".into())
            .await
            .unwrap();
        assert_eq!(user.status, "Writing again");

        let fetched = h.accounts.current_user(&identity).await.unwrap();
        assert_eq!(fetched.status, "Writing again");
    }

    #[tokio::test]
    async fn stale_identity_is_not_found() {
        let h = harness();
        let identity = ResolvedIdentity::authenticated(Uuid::new_v4());
        let err = h.accounts.current_user(&identity).await.unwrap_err();
        assert_eq!(err.code(), 404);
    }
}

mod feed {
    use super::*;

    #[tokio::test]
    async fn create_requires_authentication() {
        let h = harness();
        let err = h
            .feed
            .create_post(&ResolvedIdentity::anonymous(), draft("A title", None))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Unauthenticated));
    }

    #[tokio::test]
    async fn create_with_stale_identity_is_unauthenticated() {
        let h = harness();
        let identity = ResolvedIdentity::authenticated(Uuid::new_v4());
        let err = h
            .feed
            .create_post(&identity, draft("A title", None))
            .await
            .unwrap_err();
        assert_eq!(err.code(), 401);
    }

    #[tokio::test]
    async fn create_appends_the_post_to_the_owner_list() {
        let h = harness();
        let (user, identity) = signed_up(&h, "author@example.com", "Author").await;

        let authored = h
            .feed
            .create_post(&identity, draft("First post", None))
            .await
            .unwrap();

        assert_eq!(authored.post.creator, user.id);
        assert_eq!(authored.author.posts, vec![authored.post.id]);

        let owner = h.users.find_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(owner.posts, vec![authored.post.id]);
    }

    #[tokio::test]
    async fn create_then_get_round_trips_every_field() {
        let h = harness();
        let (user, identity) = signed_up(&h, "author@example.com", "Author").await;

        let created = h
            .feed
            .create_post(&identity, draft("Round trip", Some("images/cover.jpg")))
            .await
            .unwrap();

        let fetched = h.feed.get_post(&identity, created.post.id).await.unwrap();
        assert_eq!(fetched.post.title, "Round trip");
        assert_eq!(fetched.post.content, created.post.content);
        assert_eq!(fetched.post.image_url.as_deref(), Some("images/cover.jpg"));
        assert_eq!(fetched.post.creator, user.id);
        assert_eq!(fetched.author.id, user.id);
    }

    #[tokio::test]
    async fn get_missing_post_is_not_found() {
        let h = harness();
        let (_, identity) = signed_up(&h, "author@example.com", "Author").await;

        let err = h
            .feed
            .get_post(&identity, Uuid::new_v4())
            .await
            .unwrap_err();
        assert_eq!(err.code(), 404);
    }

    #[tokio::test]
    async fn only_the_creator_may_update_or_delete() {
        let h = harness();
        let (_, alice) = signed_up(&h, "alice@example.com", "Alice").await;
        let (_, bob) = signed_up(&h, "bob@example.com", "Bob").await;

        let authored = h
            .feed
            .create_post(&alice, draft("Alice's post", None))
            .await
            .unwrap();
        let post_id = authored.post.id;

        let patch = PostPatch {
            title: "Hijacked post".into(),
            content: "Rewritten content".into(),
            image_url: None,
        };

        let err = h
            .feed
            .update_post(&bob, post_id, patch.clone())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Forbidden));
        assert_eq!(err.code(), 403);

        let err = h.feed.delete_post(&bob, post_id).await.unwrap_err();
        assert_eq!(err.code(), 403);

        // The owner performing the same operations succeeds.
        let updated = h.feed.update_post(&alice, post_id, patch).await.unwrap();
        assert_eq!(updated.post.title, "Hijacked post");
        h.feed.delete_post(&alice, post_id).await.unwrap();
    }

    #[tokio::test]
    async fn update_overwrites_text_and_keeps_the_image_when_absent() {
        let h = harness();
        let (_, identity) = signed_up(&h, "author@example.com", "Author").await;

        let created = h
            .feed
            .create_post(&identity, draft("Original", Some("images/before.jpg")))
            .await
            .unwrap();

        let updated = h
            .feed
            .update_post(
                &identity,
                created.post.id,
                PostPatch {
                    title: "Updated title".into(),
                    content: "Updated content".into(),
                    image_url: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.post.image_url.as_deref(), Some("images/before.jpg"));

        let refetched = h.feed.get_post(&identity, created.post.id).await.unwrap();
        assert_eq!(refetched.post.title, "Updated title");
        assert_eq!(refetched.post.content, "Updated content");

        // A supplied value replaces the stored one.
        let updated = h
            .feed
            .update_post(
                &identity,
                created.post.id,
                PostPatch {
                    title: "Updated title".into(),
                    content: "Updated content".into(),
                    image_url: Some("images/after.jpg".into()),
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.post.image_url.as_deref(), Some("images/after.jpg"));
    }

    #[tokio::test]
    async fn update_validates_before_looking_up_the_post() {
        let h = harness();
        let (_, identity) = signed_up(&h, "author@example.com", "Author").await;

        // Invalid input on a nonexistent post: validation wins.
        let err = h
            .feed
            .update_post(
                &identity,
                Uuid::new_v4(),
                PostPatch {
                    title: "x".into(),
                    content: "y".into(),
                    image_url: None,
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.code(), 422);
    }

    #[tokio::test]
    async fn pagination_windows_are_deterministic() {
        let h = harness();
        let (_, identity) = signed_up(&h, "author@example.com", "Author").await;

        let mut ids = Vec::new();
        for n in 0..5 {
            let authored = h
                .feed
                .create_post(&identity, draft(&format!("Post number {n}"), None))
                .await
                .unwrap();
            ids.push(authored.post.id);
        }

        let page1 = h.feed.list_posts(&identity, Some(1)).await.unwrap();
        assert_eq!(page1.total_posts, 5);
        assert_eq!(page1.posts.len(), PAGE_SIZE as usize);
        assert_eq!(page1.posts[0].post.id, ids[4]);
        assert_eq!(page1.posts[1].post.id, ids[3]);
        assert_eq!(page1.posts[0].author.name, "Author");

        let page3 = h.feed.list_posts(&identity, Some(3)).await.unwrap();
        assert_eq!(page3.posts.len(), 1);
        assert_eq!(page3.posts[0].post.id, ids[0]);

        let page4 = h.feed.list_posts(&identity, Some(4)).await.unwrap();
        assert!(page4.posts.is_empty());
        assert_eq!(page4.total_posts, 5);
    }

    #[tokio::test]
    async fn page_defaults_to_one_when_absent_or_zero() {
        let h = harness();
        let (_, identity) = signed_up(&h, "author@example.com", "Author").await;
        let authored = h
            .feed
            .create_post(&identity, draft("Only post", None))
            .await
            .unwrap();

        for page in [None, Some(0)] {
            let listed = h.feed.list_posts(&identity, page).await.unwrap();
            assert_eq!(listed.posts.len(), 1);
            assert_eq!(listed.posts[0].post.id, authored.post.id);
        }
    }

    #[tokio::test]
    async fn delete_cascades_across_store_owner_and_image() {
        let h = harness();
        let (user, identity) = signed_up(&h, "author@example.com", "Author").await;

        let kept = h
            .feed
            .create_post(&identity, draft("Kept post", None))
            .await
            .unwrap();
        let doomed = h
            .feed
            .create_post(&identity, draft("Doomed post", Some("images/doomed.jpg")))
            .await
            .unwrap();

        h.feed.delete_post(&identity, doomed.post.id).await.unwrap();

        // Gone from the store.
        assert!(
            h.posts
                .find_by_id(doomed.post.id)
                .await
                .unwrap()
                .is_none()
        );
        // Pulled from the owner's list, leaving the sibling untouched.
        let owner = h.users.find_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(owner.posts, vec![kept.post.id]);
        // Exactly one deletion intent, for the post's own image.
        let deleted = h.assets.deleted.lock().unwrap().clone();
        assert_eq!(deleted, vec!["images/doomed.jpg".to_string()]);
    }

    #[tokio::test]
    async fn delete_without_an_image_issues_no_intent() {
        let h = harness();
        let (_, identity) = signed_up(&h, "author@example.com", "Author").await;
        let authored = h
            .feed
            .create_post(&identity, draft("Bare post", None))
            .await
            .unwrap();

        h.feed
            .delete_post(&identity, authored.post.id)
            .await
            .unwrap();

        assert!(h.assets.deleted.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn listing_requires_authentication() {
        let h = harness();
        let err = h
            .feed
            .list_posts(&ResolvedIdentity::anonymous(), None)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Unauthenticated));
    }
}
