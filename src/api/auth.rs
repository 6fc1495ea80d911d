use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::{api::ApiError, app::App, errors::SyncError, types::Credential};

/// Caller authenticated by a `Bearer` token that Spotify accepted.
pub struct AuthUser(pub Credential);

impl FromRequestParts<App> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, app: &App) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or_else(|| {
                SyncError::Unauthenticated("Missing Authorization Header".to_string())
            })?
            .to_str()
            .map_err(|_| {
                SyncError::Unauthenticated("Invalid Authorization Header format".to_string())
            })?;

        let token = bearer_token(header).ok_or_else(|| {
            SyncError::Unauthenticated("Invalid Authorization Header format".to_string())
        })?;

        let credential = app.client.authenticate(token).await?;
        Ok(AuthUser(credential))
    }
}

/// The token of a `Bearer <token>` header value.
pub fn bearer_token(header: &str) -> Option<&str> {
    let mut parts = header.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some("Bearer"), Some(token), None) => Some(token),
        _ => None,
    }
}
