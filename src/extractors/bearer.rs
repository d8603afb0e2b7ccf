//! Bearer-token guard: extracts the authenticated email from `Authorization: Bearer <token>`.

use crate::error::AppError;
use crate::service::AuthService;
use crate::state::AppState;
use async_trait::async_trait;
use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};

/// Subject of a verified token. Using this extractor makes a route protected.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthUser {
    pub email: String,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = AppState::from_ref(state);
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(bearer_token)
            .ok_or_else(|| AppError::Unauthorized("missing bearer token".into()))?;
        let email = AuthService::verify(&state.tokens, token)?;
        Ok(AuthUser { email })
    }
}

/// `Bearer <token>` (scheme is case-insensitive) → `<token>`.
fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.trim().split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}
