use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::{errors::SyncError, warning};

/// `SyncError` rendered as an HTTP response.
///
/// The body is `{ "error": ..., "stage": ..., "added_count": ..., "playlist_id": ... }`;
/// everything but `error` is only present for upstream failures.
#[derive(Debug)]
pub struct ApiError(pub SyncError);

impl From<SyncError> for ApiError {
    fn from(error: SyncError) -> Self {
        ApiError(error)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            SyncError::BadInput(_) => StatusCode::BAD_REQUEST,
            SyncError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            SyncError::NotFound(_) => StatusCode::NOT_FOUND,
            SyncError::UpstreamRead { .. }
            | SyncError::UpstreamWrite { .. }
            | SyncError::RemoteRead { .. }
            | SyncError::Decode { .. }
            | SyncError::Network(_) => StatusCode::BAD_GATEWAY,
            SyncError::CacheCorrupt { .. } | SyncError::Cache(_) | SyncError::Config(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            warning!("Request failed: {}", self.0);
        }

        let mut body = json!({ "error": self.0.to_string() });
        if let Some(stage) = self.0.stage() {
            body["stage"] = json!(stage.to_string());
        }
        if let Some(added) = self.0.added_before_failure() {
            body["added_count"] = json!(added);
        }
        if let Some(playlist_id) = self.0.playlist_id() {
            body["playlist_id"] = json!(playlist_id);
        }

        (status, Json(body)).into_response()
    }
}
