//! # API Module
//!
//! HTTP handlers of the sync server.
//!
//! ## Endpoints
//!
//! - `POST /login` - [`login`] exchanges an authorization code for a token
//! - `GET /playlists` - [`playlists::list`] lists the caller's playlists
//! - `POST /playlist/create` - [`playlists::create`] builds a playlist from an artist's discography
//! - `POST /playlist/modify` - [`playlists::modify`] appends an artist's missing tracks to a playlist
//! - `DELETE /cache/{artist_id}` - [`playlists::clear_cache`] drops a cached catalog
//! - `GET /health` - [`health`] liveness and version
//!
//! Every route except `/login` and `/health` needs an `Authorization: Bearer`
//! header; the [`AuthUser`] extractor checks it against Spotify's `/me`.
//! Failures are rendered by [`ApiError`].

mod auth;
mod error;
mod health;
mod login;
pub mod playlists;

pub use auth::{AuthUser, bearer_token};
pub use error::ApiError;
pub use health::health;
pub use login::login;
