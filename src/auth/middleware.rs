// Authentication extractor for protected routes

use std::sync::Arc;

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts},
};
use tracing::warn;

use crate::auth::{error::AuthError, token::TokenService};

/// Authenticated user extracted from a `Bearer` access token
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub id: i32,
    pub username: String,
    pub is_active: bool,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    Arc<TokenService>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let endpoint = parts.uri.path().to_string();

        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .ok_or_else(|| {
                warn!("Missing Authorization header for endpoint: {}", endpoint);
                AuthError::MissingToken
            })?
            .to_str()
            .map_err(|_| AuthError::InvalidToken)?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            warn!(
                "Authorization header missing 'Bearer ' prefix for endpoint: {}",
                endpoint
            );
            AuthError::InvalidToken
        })?;

        let token_service = Arc::<TokenService>::from_ref(state);
        let claims = token_service.verify(token)?;

        Ok(AuthenticatedUser {
            id: claims.id,
            username: claims.username,
            is_active: claims.is_active,
        })
    }
}
