//! Error taxonomy for discosync.

use std::fmt;

use thiserror::Error;

/// The pipeline stage an upstream failure happened in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    AlbumListing,
    PlaylistListing,
    CreatePlaylist,
    AddTracks,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::AlbumListing => "album_listing",
            Stage::PlaylistListing => "playlist_listing",
            Stage::CreatePlaylist => "create_playlist",
            Stage::AddTracks => "add_tracks",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug)]
pub enum SyncError {
    /// Malformed request or artist reference
    #[error("Bad input: {0}")]
    BadInput(String),

    /// Missing or rejected access credential
    #[error("Unauthenticated: {0}")]
    Unauthenticated(String),

    /// The artist has no tracks in the catalog
    #[error("Not found: {0}")]
    NotFound(String),

    /// A page of a paginated read came back with a non-success status
    #[error("Remote read failed (status {status}): {body}")]
    RemoteRead { status: u16, body: String },

    /// A response body did not have the expected shape
    #[error("Failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// Transport level failure, including timeouts
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A read the sync could not continue without failed
    #[error("Upstream read failed during {stage}: {source}")]
    UpstreamRead {
        stage: Stage,
        #[source]
        source: Box<SyncError>,
    },

    /// A playlist write failed after `added` tracks had been written to
    /// `playlist_id` (unset when the playlist itself could not be created)
    #[error("Upstream write failed during {stage} after {added} tracks: {message}")]
    UpstreamWrite {
        stage: Stage,
        added: usize,
        playlist_id: Option<String>,
        status: Option<u16>,
        message: String,
    },

    /// A cached catalog could not be decoded; recovered by rebuilding
    #[error("Cache entry for {key} is corrupt: {message}")]
    CacheCorrupt { key: String, message: String },

    /// The cache store itself failed
    #[error("Cache store error: {0}")]
    Cache(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl SyncError {
    /// Wraps a read failure with the stage it happened in.
    ///
    /// A 401 from the remote means the caller's token is no good, which is
    /// reported as such instead of as an upstream problem.
    pub fn upstream_read(stage: Stage, source: SyncError) -> Self {
        match source {
            SyncError::RemoteRead { status: 401, body } => SyncError::Unauthenticated(body),
            SyncError::Unauthenticated(_) | SyncError::BadInput(_) => source,
            other => SyncError::UpstreamRead {
                stage,
                source: Box::new(other),
            },
        }
    }

    /// Number of tracks written before a write failure, if this is one.
    pub fn added_before_failure(&self) -> Option<usize> {
        match self {
            SyncError::UpstreamWrite { added, .. } => Some(*added),
            _ => None,
        }
    }

    /// Playlist a failed write was going to, if it exists.
    pub fn playlist_id(&self) -> Option<&str> {
        match self {
            SyncError::UpstreamWrite { playlist_id, .. } => playlist_id.as_deref(),
            _ => None,
        }
    }

    pub fn stage(&self) -> Option<Stage> {
        match self {
            SyncError::UpstreamRead { stage, .. } | SyncError::UpstreamWrite { stage, .. } => {
                Some(*stage)
            }
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, SyncError>;
