//! Image upload endpoint.
//!
//! The body is the raw image bytes; the multipart dance happens client-side.
//! The rest of the system only ever sees the returned file path.

use actix_web::{HttpResponse, web};
use serde::Deserialize;
use uuid::Uuid;

use pluma_core::error::ValidationIssue;
use pluma_shared::ApiResponse;
use pluma_shared::dto::UploadResponse;

use crate::middleware::auth::Caller;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct UploadQuery {
    /// Path of the image this upload replaces, scheduled for deletion.
    pub old_path: Option<String>,
}

/// PUT /api/feed/post-image - Protected route
pub async fn upload_image(
    state: web::Data<AppState>,
    caller: Caller,
    query: web::Query<UploadQuery>,
    body: web::Bytes,
) -> AppResult<HttpResponse> {
    caller.0.require()?;

    if body.is_empty() {
        return Err(AppError::Validation(vec![ValidationIssue::new(
            "no image provided",
        )]));
    }

    let filename = format!("{}.jpg", Uuid::new_v4());
    let file_path = state.asset_store.save(&filename, &body).await?;

    if let Some(old_path) = &query.old_path {
        state.assets.discard(old_path).await;
    }

    Ok(HttpResponse::Created().json(ApiResponse::ok_with_message(
        UploadResponse { file_path },
        "file stored",
    )))
}
