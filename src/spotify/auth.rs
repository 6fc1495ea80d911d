use reqwest::Client;

use crate::{
    config::OAuthSettings,
    errors::{Result, SyncError},
    spotify::SpotifyClient,
    types::{Credential, CurrentUser, Token},
};

impl SpotifyClient {
    /// Resolves the user behind a bearer token via `GET /me`.
    ///
    /// Any non-success answer means the token cannot be trusted and is
    /// reported as `SyncError::Unauthenticated`.
    pub async fn current_user(&self, token: &str) -> Result<CurrentUser> {
        if token.trim().is_empty() {
            return Err(SyncError::Unauthenticated(
                "Missing access token".to_string(),
            ));
        }

        let url = self.url("/me");
        let response = self.transport().get(&url, token).await?;
        if !response.is_success() {
            return Err(SyncError::Unauthenticated(format!(
                "Invalid or expired token (status {})",
                response.status
            )));
        }

        let user: CurrentUser = response.decode(&url)?;
        if user.id.is_empty() {
            return Err(SyncError::Unauthenticated(
                "ID not found in response".to_string(),
            ));
        }
        Ok(user)
    }

    /// Turns a bearer token into a [`Credential`] for the sync operations.
    pub async fn authenticate(&self, token: &str) -> Result<Credential> {
        let user = self.current_user(token).await?;
        Ok(Credential::new(user.id, token))
    }
}

/// Exchanges an authorization code for an access token.
///
/// Completes the authorization-code flow started by the front end. The
/// client credentials are sent with HTTP basic auth, as the token endpoint
/// expects for confidential clients.
///
/// # Errors
///
/// - `SyncError::BadInput` when `code` is empty
/// - `SyncError::Unauthenticated` when the token endpoint rejects the code
/// - `SyncError::Network` / `SyncError::Decode` for transport problems
pub async fn exchange_code(
    client: &Client,
    token_url: &str,
    oauth: &OAuthSettings,
    code: &str,
) -> Result<Token> {
    if code.trim().is_empty() {
        return Err(SyncError::BadInput("Code is required".to_string()));
    }

    let response = client
        .post(token_url)
        .basic_auth(&oauth.client_id, Some(&oauth.client_secret))
        .form(&[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", oauth.redirect_uri.as_str()),
        ])
        .send()
        .await?;

    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(SyncError::Unauthenticated(format!(
            "Token exchange failed (status {}): {}",
            status.as_u16(),
            body
        )));
    }

    serde_json::from_str(&body).map_err(|source| SyncError::Decode {
        url: token_url.to_string(),
        source,
    })
}
