//! # Spotify Integration Module
//!
//! Everything that talks to the Spotify Web API lives here. The rest of the
//! crate never builds a URL or looks at a status code.
//!
//! ```text
//! Sync layer (create / augment)
//!          ↓
//! Spotify Integration Layer
//!     ├── paging    (cursor traversal of listings)
//!     ├── catalog   (artist albums → deduplicated track catalog)
//!     ├── playlist  (existing tracks, diff, chunked writes, creation)
//!     └── auth      (current user, authorization-code exchange)
//!          ↓
//! Transport (reqwest, one shared client with a fixed timeout)
//!          ↓
//! Spotify Web API
//! ```
//!
//! ## API Coverage
//!
//! - `GET /me` - Resolve the caller behind a bearer token
//! - `GET /me/playlists` - The caller's playlists
//! - `GET /artists/{id}/albums` - Albums and singles of an artist
//! - `GET /albums/{id}/tracks` - Track listing of an album
//! - `GET /playlists/{id}/tracks` - Current playlist contents
//! - `POST /users/{user_id}/playlists` - Create a playlist
//! - `POST /playlists/{id}/tracks` - Append tracks
//!
//! ## Transport seam
//!
//! All requests go through the [`Transport`] trait, which returns the raw
//! status and body. [`HttpTransport`] is the production implementation;
//! tests plug in fakes. There is no retry or rate limiting:
//! a failed request fails the operation it belongs to.

pub mod auth;
pub mod catalog;
pub mod paging;
pub mod playlist;

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::errors::{Result, SyncError};

/// Status and body of a remote response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn decode<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        serde_json::from_str(&self.body).map_err(|source| SyncError::Decode {
            url: url.to_string(),
            source,
        })
    }
}

/// Authenticated access to the remote API.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &str, token: &str) -> Result<RawResponse>;

    async fn post_json(&self, url: &str, token: &str, body: serde_json::Value)
    -> Result<RawResponse>;
}

/// reqwest-backed transport sharing one connection pool for the whole process.
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }

    pub fn client(&self) -> &Client {
        &self.client
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str, token: &str) -> Result<RawResponse> {
        let response = self.client.get(url).bearer_auth(token).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(RawResponse { status, body })
    }

    async fn post_json(
        &self,
        url: &str,
        token: &str,
        body: serde_json::Value,
    ) -> Result<RawResponse> {
        let response = self
            .client
            .post(url)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(RawResponse { status, body })
    }
}

/// Cheap-to-clone handle on the transport plus the API base URL.
#[derive(Clone)]
pub struct SpotifyClient {
    transport: Arc<dyn Transport>,
    api_url: String,
}

impl SpotifyClient {
    pub fn new(transport: Arc<dyn Transport>, api_url: impl Into<String>) -> Self {
        Self {
            transport,
            api_url: api_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn transport(&self) -> &dyn Transport {
        self.transport.as_ref()
    }

    /// Absolute URL for an API path such as `/albums/{id}/tracks`.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }
}
