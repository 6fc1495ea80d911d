use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// One page of a cursor-paginated Spotify listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    #[serde(default)]
    pub next: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ArtistRef {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Album {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub release_date: String,
    #[serde(default)]
    pub release_date_precision: String,
    #[serde(default)]
    pub album_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Track {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub uri: String,
    #[serde(default)]
    pub album_id: String,
    #[serde(default)]
    pub artists: Vec<ArtistRef>,
    #[serde(default)]
    pub disc_number: u32,
    #[serde(default)]
    pub track_number: u32,
}

impl Track {
    pub fn is_credited_to(&self, artist_id: &str) -> bool {
        self.artists.iter().any(|a| a.id == artist_id)
    }
}

/// Album id to release date, filled during the album listing pass.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct ReleaseDateIndex {
    dates: HashMap<String, String>,
}

impl ReleaseDateIndex {
    pub fn insert(&mut self, album: &Album) {
        self.dates
            .insert(album.id.clone(), album.release_date.clone());
    }

    /// Release date of an album, or `""` when the album is unknown.
    pub fn release_date(&self, album_id: &str) -> &str {
        self.dates.get(album_id).map(String::as_str).unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn album_ids(&self) -> impl Iterator<Item = &str> {
        self.dates.keys().map(String::as_str)
    }
}

/// Deduplicated tracks credited to one artist.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ArtistCatalog {
    pub artist_id: String,
    pub tracks: HashMap<String, Track>,
    #[serde(default)]
    pub release_dates: ReleaseDateIndex,
}

impl ArtistCatalog {
    pub fn new(artist_id: &str) -> Self {
        Self {
            artist_id: artist_id.to_string(),
            ..Default::default()
        }
    }

    /// Adds a track unless it lacks an identity or does not credit the
    /// catalog's artist. A track seen before is replaced.
    pub fn insert(&mut self, track: Track) -> bool {
        if track.id.is_empty() || !track.is_credited_to(&self.artist_id) {
            return false;
        }
        self.tracks.insert(track.id.clone(), track);
        true
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn contains(&self, track_id: &str) -> bool {
        self.tracks.contains_key(track_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Track> {
        self.tracks.values()
    }
}

/// An album whose tracks could not be fetched while building a catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedAlbum {
    pub album_id: String,
    pub reason: String,
}

/// Result of a catalog build: the (possibly partial) catalog and the albums
/// that were left out.
#[derive(Debug, Clone, Default)]
pub struct CatalogBuild {
    pub catalog: ArtistCatalog,
    pub skipped: Vec<SkippedAlbum>,
}

/// Track ids currently in a playlist.
pub type PlaylistTrackSet = HashSet<String>;

/// Entry of a playlist's track listing. `track` is null for removed tracks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistItem {
    #[serde(default)]
    pub track: Option<PlaylistItemTrack>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistItemTrack {
    #[serde(default)]
    pub id: Option<String>,
}

/// The caller as vouched for by the auth collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    pub user_id: String,
    pub access_token: String,
}

impl Credential {
    pub fn new(user_id: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            access_token: access_token.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaylistTarget {
    New { name: String },
    Existing { playlist_id: String },
}

#[derive(Debug, Clone)]
pub struct SyncRequest {
    pub artist_ref: String,
    pub target: PlaylistTarget,
    pub credential: Credential,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateOutcome {
    pub playlist_id: String,
    pub track_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AugmentOutcome {
    pub added_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    Created(CreateOutcome),
    Augmented(AugmentOutcome),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylistRequest {
    pub name: String,
    pub description: String,
    pub public: bool,
    pub collaborative: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylistResponse {
    pub id: String,
    #[serde(default)]
    pub uri: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTrackToPlaylistRequest {
    pub uris: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistOwner {
    pub id: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistTracksRef {
    #[serde(default)]
    pub total: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Playlist {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub public: Option<bool>,
    #[serde(default)]
    pub collaborative: bool,
    #[serde(default)]
    pub snapshot_id: String,
    #[serde(default)]
    pub uri: String,
    pub owner: PlaylistOwner,
    #[serde(default)]
    pub tracks: Option<PlaylistTracksRef>,
}

#[derive(Tabled)]
pub struct PlaylistTableRow {
    pub id: String,
    pub name: String,
    pub owner: String,
    pub tracks: u64,
}

/// Token endpoint answer for the authorization-code exchange.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    #[serde(default)]
    pub token_type: String,
    #[serde(default)]
    pub scope: String,
    #[serde(default)]
    pub expires_in: u64,
    #[serde(default)]
    pub refresh_token: Option<String>,
}
