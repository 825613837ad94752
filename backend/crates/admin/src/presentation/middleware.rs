//! Admin Middleware
//!
//! Bearer-token gate for protected admin routes.

use axum::body::Body;
use axum::extract::State;
use axum::http::{HeaderMap, Request, header};
use axum::middleware::Next;
use axum::response::Response;
use std::sync::Arc;

use crate::application::token::TokenService;
use crate::error::AdminError;

/// Middleware state
#[derive(Clone)]
pub struct AdminMiddlewareState {
    pub tokens: Arc<TokenService>,
}

/// Middleware that requires a valid bearer token.
///
/// On success the verified `AdminIdentity` is stored in request extensions.
/// Every failure renders the same 401 so callers learn nothing about why.
pub async fn require_admin_token(
    State(state): State<AdminMiddlewareState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AdminError> {
    let Some(token) = bearer_token(req.headers()) else {
        return Err(AdminError::Unauthorized);
    };

    let identity = state.tokens.verify(token).map_err(|e| {
        tracing::warn!(error = %e, "Bearer token rejected");
        AdminError::Unauthorized
    })?;

    req.extensions_mut().insert(identity);

    Ok(next.run(req).await)
}

/// Extract the token from `Authorization: Bearer <token>`
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;

    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }

    let token = token.trim();
    (!token.is_empty()).then_some(token)
}
