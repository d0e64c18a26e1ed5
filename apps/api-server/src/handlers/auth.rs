//! Account handlers.

use actix_web::{HttpResponse, web};

use pluma_core::domain::User;
use pluma_core::service::Registration;
use pluma_shared::dto::{
    LoginRequest, RegisterRequest, SessionResponse, StatusUpdateRequest, UserResponse,
};

use crate::middleware::auth::Caller;
use crate::middleware::error::AppResult;
use crate::state::AppState;

fn user_response(user: &User) -> UserResponse {
    UserResponse {
        id: user.id.to_string(),
        email: user.email.clone(),
        name: user.name.clone(),
        status: user.status.clone(),
        posts: user.posts.iter().map(|id| id.to_string()).collect(),
        created_at: user.created_at.to_rfc3339(),
        updated_at: user.updated_at.to_rfc3339(),
    }
}

/// POST /api/auth/register
pub async fn register(
    state: web::Data<AppState>,
    body: web::Json<RegisterRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let user = state
        .accounts
        .register(Registration {
            email: req.email,
            name: req.name,
            password: req.password,
        })
        .await?;

    Ok(HttpResponse::Created().json(user_response(&user)))
}

/// POST /api/auth/login
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let session = state.accounts.login(&req.email, &req.password).await?;

    Ok(HttpResponse::Ok().json(SessionResponse {
        token: session.token,
        user_id: session.user_id.to_string(),
    }))
}

/// GET /api/auth/me - Protected route
pub async fn me(state: web::Data<AppState>, caller: Caller) -> AppResult<HttpResponse> {
    let user = state.accounts.current_user(&caller.0).await?;
    Ok(HttpResponse::Ok().json(user_response(&user)))
}

/// PUT /api/auth/status - Protected route
pub async fn update_status(
    state: web::Data<AppState>,
    caller: Caller,
    body: web::Json<StatusUpdateRequest>,
) -> AppResult<HttpResponse> {
    let user = state
        .accounts
        .update_status(&caller.0, body.into_inner().status)
        .await?;
    Ok(HttpResponse::Ok().json(user_response(&user)))
}
