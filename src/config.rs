//! Configuration management for discosync.
//!
//! Values come from environment variables, optionally seeded from a `.env`
//! file in the local data directory. Every getter has a sensible default
//! except the OAuth client settings, which only the `/login` route needs.
//!
//! Precedence:
//! 1. Environment variables
//! 2. `.env` file in the local data directory
//! 3. Defaults defined here

use std::{env, path::PathBuf, str::FromStr, time::Duration};

use crate::{
    errors::{Result, SyncError},
    warning,
};

pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_SERVER_ADDRESS: &str = "0.0.0.0:8080";
pub const DEFAULT_CACHE_TTL_SECS: u64 = 6 * 60 * 60;
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_CHUNK_SIZE: usize = 100;
/// Longest accepted cache lifetime, 30 days.
pub const MAX_CACHE_TTL_SECS: u64 = 30 * 24 * 60 * 60;

/// Directory holding the `.env` file and the file cache.
///
/// - Linux: `~/.local/share/discosync`
/// - macOS: `~/Library/Application Support/discosync`
/// - Windows: `%LOCALAPPDATA%/discosync`
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("discosync");
    path
}

/// Loads environment variables from `<data_dir>/.env`.
///
/// Creates the data directory if needed. A missing `.env` file is reported
/// as an error so the caller can decide whether that matters; variables
/// already set in the environment are never overridden.
pub async fn load_env() -> Result<()> {
    let path = data_dir().join(".env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| SyncError::Config(e.to_string()))?;
    }

    dotenv::from_path(&path)
        .map(|_| ())
        .map_err(|e| SyncError::Config(format!("{}: {}", path.display(), e)))
}

/// Base URL of the Spotify Web API (`SPOTIFY_API_URL`).
pub fn spotify_apiurl() -> String {
    env::var("SPOTIFY_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string())
}

/// OAuth token endpoint (`SPOTIFY_API_TOKEN_URL`).
pub fn spotify_apitoken_url() -> String {
    env::var("SPOTIFY_API_TOKEN_URL").unwrap_or_else(|_| DEFAULT_TOKEN_URL.to_string())
}

pub fn spotify_client_id() -> Option<String> {
    env::var("SPOTIFY_API_AUTH_CLIENT_ID").ok()
}

/// The client secret. Keep it out of logs.
pub fn spotify_client_secret() -> Option<String> {
    env::var("SPOTIFY_API_AUTH_CLIENT_SECRET").ok()
}

pub fn spotify_redirect_uri() -> Option<String> {
    env::var("SPOTIFY_API_REDIRECT_URI").ok()
}

/// Address the HTTP server binds to (`SERVER_ADDRESS`).
pub fn server_addr() -> String {
    env::var("SERVER_ADDRESS").unwrap_or_else(|_| DEFAULT_SERVER_ADDRESS.to_string())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheBackend {
    Memory,
    File,
}

impl FromStr for CacheBackend {
    type Err = SyncError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "memory" => Ok(CacheBackend::Memory),
            "file" => Ok(CacheBackend::File),
            other => Err(SyncError::Config(format!(
                "CACHE_BACKEND must be \"file\" or \"memory\", got {:?}",
                other
            ))),
        }
    }
}

/// OAuth client settings used for the authorization-code exchange.
#[derive(Debug, Clone)]
pub struct OAuthSettings {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
}

/// Everything the process needs, read once at startup.
#[derive(Debug, Clone)]
pub struct Settings {
    pub api_url: String,
    pub token_url: String,
    pub oauth: Option<OAuthSettings>,
    pub server_addr: String,
    pub cache_backend: CacheBackend,
    pub cache_dir: PathBuf,
    pub cache_ttl: Duration,
    pub http_timeout: Duration,
    pub chunk_size: usize,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        let oauth = match (
            spotify_client_id(),
            spotify_client_secret(),
            spotify_redirect_uri(),
        ) {
            (Some(client_id), Some(client_secret), Some(redirect_uri)) => Some(OAuthSettings {
                client_id,
                client_secret,
                redirect_uri,
            }),
            _ => None,
        };

        let cache_backend = match env::var("CACHE_BACKEND") {
            Ok(value) => value.parse()?,
            Err(_) => CacheBackend::File,
        };

        Ok(Self {
            api_url: spotify_apiurl().trim_end_matches('/').to_string(),
            token_url: spotify_apitoken_url(),
            oauth,
            server_addr: server_addr(),
            cache_backend,
            cache_dir: data_dir().join("cache"),
            cache_ttl: cache_ttl(parse_var("CACHE_TTL_SECS", DEFAULT_CACHE_TTL_SECS)?)?,
            http_timeout: http_timeout(parse_var(
                "HTTP_TIMEOUT_SECS",
                DEFAULT_HTTP_TIMEOUT_SECS,
            )?)?,
            chunk_size: DEFAULT_CHUNK_SIZE,
        })
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
            oauth: None,
            server_addr: DEFAULT_SERVER_ADDRESS.to_string(),
            cache_backend: CacheBackend::Memory,
            cache_dir: data_dir().join("cache"),
            cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

/// Cache lifetime from `CACHE_TTL_SECS`. Zero is rejected and anything
/// above [`MAX_CACHE_TTL_SECS`] is clamped to it.
pub fn cache_ttl(secs: u64) -> Result<Duration> {
    if secs == 0 {
        return Err(SyncError::Config(
            "CACHE_TTL_SECS must be greater than 0".to_string(),
        ));
    }
    if secs > MAX_CACHE_TTL_SECS {
        warning!(
            "CACHE_TTL_SECS={} is too large, using {}",
            secs,
            MAX_CACHE_TTL_SECS
        );
    }
    Ok(Duration::from_secs(secs.min(MAX_CACHE_TTL_SECS)))
}

/// Request timeout from `HTTP_TIMEOUT_SECS`. Zero is rejected.
pub fn http_timeout(secs: u64) -> Result<Duration> {
    if secs == 0 {
        return Err(SyncError::Config(
            "HTTP_TIMEOUT_SECS must be greater than 0".to_string(),
        ));
    }
    Ok(Duration::from_secs(secs))
}

fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|e| SyncError::Config(format!("{} is invalid: {}", name, e))),
        Err(_) => Ok(default),
    }
}
