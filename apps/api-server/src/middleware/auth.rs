//! Caller resolution - runs once per request, before any handler.

use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header, web};
use std::future::{Ready, ready};
use std::sync::Arc;

use pluma_core::identity::ResolvedIdentity;
use pluma_core::ports::{AuthError, TokenService};

use crate::middleware::error::AppError;

/// Extractor resolving the optional bearer token into a [`ResolvedIdentity`].
///
/// No Authorization header yields an anonymous identity and the request
/// proceeds; each operation decides whether to reject it. A header that is
/// present but malformed, tampered, or expired rejects the request here,
/// before the handler runs.
///
/// ```ignore
/// async fn protected_route(caller: Caller) -> impl Responder {
///     let user_id = caller.0.require()?;
///     ...
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Caller(pub ResolvedIdentity);

impl FromRequest for Caller {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        // Get token service from app data
        let tokens = match req.app_data::<web::Data<Arc<dyn TokenService>>>() {
            Some(service) => service,
            None => {
                tracing::error!("TokenService not found in app data");
                return ready(Err(AppError::Internal(
                    "Server configuration error".to_string(),
                )));
            }
        };

        // Absent header: anonymous caller, rejection deferred to the operation.
        let auth_header = match req.headers().get(header::AUTHORIZATION) {
            Some(value) => value,
            None => return ready(Ok(Caller(ResolvedIdentity::anonymous()))),
        };

        let auth_str = match auth_header.to_str() {
            Ok(s) => s,
            Err(_) => {
                return ready(Err(AppError::Auth(AuthError::InvalidToken(
                    "Invalid authorization header".to_string(),
                ))));
            }
        };

        // Parse "Bearer <token>"
        let token = match auth_str.strip_prefix("Bearer ") {
            Some(t) => t,
            None => {
                return ready(Err(AppError::Auth(AuthError::InvalidToken(
                    "Expected Bearer token".to_string(),
                ))));
            }
        };

        // A presented token must verify; failure here is a request-level
        // rejection, not a downgrade to anonymous.
        match tokens.verify(token) {
            Ok(claims) => ready(Ok(Caller(ResolvedIdentity::authenticated(claims.user_id)))),
            Err(e) => ready(Err(AppError::Auth(e))),
        }
    }
}
