use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde::Deserialize;

use crate::{
    api::ApiError, app::App, errors::SyncError, spotify::auth::exchange_code, types::Token,
};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub code: String,
}

/// Exchanges the authorization code the front end received for a token.
pub async fn login(
    State(app): State<App>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<Token>, ApiError> {
    let Json(request) =
        payload.map_err(|_| SyncError::BadInput("Invalid request body".to_string()))?;

    let oauth = app.settings.oauth.as_ref().ok_or_else(|| {
        SyncError::Config("OAuth client settings are not configured".to_string())
    })?;

    let token = exchange_code(&app.http, &app.settings.token_url, oauth, &request.code).await?;
    Ok(Json(token))
}
