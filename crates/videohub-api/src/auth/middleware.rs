//! Bearer-token authentication middleware.
//!
//! Applied to every `/videos` route. On success the verified account id is
//! inserted as a request extension; handlers pull it back out with the
//! [`CurrentAccount`] extractor.

use crate::auth::TokenService;
use crate::error::HttpAppError;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use uuid::Uuid;
use videohub_core::AppError;

/// The account a verified request is acting as.
#[derive(Debug, Clone, Copy)]
pub struct CurrentAccount(pub Uuid);

impl<S> FromRequestParts<S> for CurrentAccount
where
    S: Send + Sync,
{
    type Rejection = HttpAppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentAccount>()
            .copied()
            .ok_or_else(|| {
                HttpAppError(AppError::Unauthorized("Invalid credentials".to_string()))
            })
    }
}

pub async fn auth_middleware(
    State(tokens): State<Arc<TokenService>>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "));

    let token = match token {
        Some(t) if !t.is_empty() => t,
        _ => {
            tracing::debug!("Missing or malformed Authorization header");
            return HttpAppError(AppError::Unauthorized("Invalid credentials".to_string()))
                .into_response();
        }
    };

    let account_id = match tokens.verify(token) {
        Ok(id) => id,
        Err(err) => return HttpAppError(err).into_response(),
    };

    request.extensions_mut().insert(CurrentAccount(account_id));
    next.run(request).await
}
