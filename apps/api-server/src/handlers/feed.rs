//! Feed handlers.

use actix_web::{HttpResponse, web};
use serde::Deserialize;
use uuid::Uuid;

use pluma_core::service::{AuthoredPost, PostDraft, PostPatch};
use pluma_shared::dto::{FeedPageResponse, PostAuthor, PostInput, PostResponse};

use crate::middleware::auth::Caller;
use crate::middleware::error::AppResult;
use crate::state::AppState;

fn post_response(authored: &AuthoredPost) -> PostResponse {
    PostResponse {
        id: authored.post.id.to_string(),
        title: authored.post.title.clone(),
        content: authored.post.content.clone(),
        image_url: authored.post.image_url.clone(),
        author: PostAuthor {
            id: authored.author.id.to_string(),
            name: authored.author.name.clone(),
        },
        created_at: authored.post.created_at.to_rfc3339(),
        updated_at: authored.post.updated_at.to_rfc3339(),
    }
}

/// POST /api/feed/posts
pub async fn create_post(
    state: web::Data<AppState>,
    caller: Caller,
    body: web::Json<PostInput>,
) -> AppResult<HttpResponse> {
    let input = body.into_inner();

    let authored = state
        .feed
        .create_post(
            &caller.0,
            PostDraft {
                title: input.title,
                content: input.content,
                image_url: input.image_url,
            },
        )
        .await?;

    Ok(HttpResponse::Created().json(post_response(&authored)))
}

#[derive(Debug, Deserialize)]
pub struct ListPostsQuery {
    pub page: Option<u64>,
}

/// GET /api/feed/posts?page=N
pub async fn list_posts(
    state: web::Data<AppState>,
    caller: Caller,
    query: web::Query<ListPostsQuery>,
) -> AppResult<HttpResponse> {
    let page = state.feed.list_posts(&caller.0, query.page).await?;

    Ok(HttpResponse::Ok().json(FeedPageResponse {
        posts: page.posts.iter().map(post_response).collect(),
        total_posts: page.total_posts,
    }))
}

/// GET /api/feed/posts/{id}
pub async fn get_post(
    state: web::Data<AppState>,
    caller: Caller,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let authored = state.feed.get_post(&caller.0, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(post_response(&authored)))
}

/// PUT /api/feed/posts/{id}
pub async fn update_post(
    state: web::Data<AppState>,
    caller: Caller,
    path: web::Path<Uuid>,
    body: web::Json<PostInput>,
) -> AppResult<HttpResponse> {
    let input = body.into_inner();

    let authored = state
        .feed
        .update_post(
            &caller.0,
            path.into_inner(),
            PostPatch {
                title: input.title,
                content: input.content,
                image_url: input.image_url,
            },
        )
        .await?;

    Ok(HttpResponse::Ok().json(post_response(&authored)))
}

/// DELETE /api/feed/posts/{id}
pub async fn delete_post(
    state: web::Data<AppState>,
    caller: Caller,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    state.feed.delete_post(&caller.0, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(true))
}
