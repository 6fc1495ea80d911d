use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::{
    api::{ApiError, AuthUser},
    app::App,
    errors::SyncError,
    types::Playlist,
};

#[derive(Debug, Deserialize)]
pub struct CreatePlaylistBody {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub artist_url: String,
}

#[derive(Debug, Deserialize)]
pub struct ModifyPlaylistBody {
    #[serde(default)]
    pub playlist_id: String,
    #[serde(default)]
    pub artist_url: String,
}

fn invalid_body(_: JsonRejection) -> ApiError {
    SyncError::BadInput("Invalid request body".to_string()).into()
}

/// `GET /playlists`
pub async fn list(
    State(app): State<App>,
    AuthUser(credential): AuthUser,
) -> Result<Json<Vec<Playlist>>, ApiError> {
    let playlists = app.client.user_playlists(&credential.access_token).await?;
    Ok(Json(playlists))
}

/// `POST /playlist/create`
pub async fn create(
    State(app): State<App>,
    AuthUser(credential): AuthUser,
    payload: Result<Json<CreatePlaylistBody>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(body) = payload.map_err(invalid_body)?;

    let outcome = app
        .orchestrator
        .create_from_artist(&body.artist_url, &body.name, &credential)
        .await?;

    Ok(Json(json!({
        "message": format!(
            "Playlist '{}' created and {} tracks added.",
            body.name.trim(),
            outcome.track_count
        ),
        "playlist": outcome.playlist_id,
        "count": outcome.track_count,
    })))
}

/// `POST /playlist/modify`
pub async fn modify(
    State(app): State<App>,
    AuthUser(credential): AuthUser,
    payload: Result<Json<ModifyPlaylistBody>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(body) = payload.map_err(invalid_body)?;

    let outcome = app
        .orchestrator
        .augment_playlist(&body.artist_url, &body.playlist_id, &credential)
        .await?;

    let message = if outcome.added_count == 0 {
        "All artist tracks are already in the playlist".to_string()
    } else {
        format!(
            "Added {} missing artist tracks to playlist {}",
            outcome.added_count,
            body.playlist_id.trim()
        )
    };

    Ok(Json(json!({
        "message": message,
        "added_count": outcome.added_count,
    })))
}

/// `DELETE /cache/{artist_id}`
pub async fn clear_cache(
    State(app): State<App>,
    AuthUser(_): AuthUser,
    Path(artist): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let artist_id = crate::utils::parse_artist_id(&artist)?;
    app.orchestrator.cache().invalidate(&artist_id).await?;
    Ok(Json(json!({ "cleared": artist_id })))
}
