//! Axum extractors for authentication
//!
//! Generic over any state `S` where `SharedAuthService: FromRef<S>`.
//! This is axum's idiomatic nested-state pattern.

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts, HeaderValue},
};

use crate::error::AuthError;
use crate::service::{AuthPrincipal, SharedAuthService};

/// Authenticated user extractor.
///
/// Pulls the bearer token from the `Authorization` header and resolves it
/// through the external auth service. Handlers receive the resolved
/// `AuthPrincipal` as the ownership scope for every repository call.
#[derive(Debug)]
pub struct AuthUser(pub AuthPrincipal);

fn extract_bearer_token(header: &HeaderValue) -> Result<&str, AuthError> {
    let value = header
        .to_str()
        .map_err(|_| AuthError::InvalidAuthorizationFormat)?;
    value
        .strip_prefix("Bearer ")
        .filter(|token| !token.is_empty())
        .ok_or(AuthError::InvalidAuthorizationFormat)
}

impl<S> FromRequestParts<S> for AuthUser
where
    SharedAuthService: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        let auth = SharedAuthService::from_ref(state);

        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or(AuthError::MissingAuthorization)?;

        let token = extract_bearer_token(auth_header)?;
        let principal = auth.resolve_current_user(token).await?;

        Ok(AuthUser(principal))
    }
}
