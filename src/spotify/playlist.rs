use crate::{
    config::DEFAULT_CHUNK_SIZE,
    errors::{Result, Stage, SyncError},
    info,
    spotify::{SpotifyClient, paging::PagedFetcher},
    types::{
        AddTrackToPlaylistRequest, ArtistCatalog, CreatePlaylistRequest, CreatePlaylistResponse,
        Playlist, PlaylistItem, PlaylistTrackSet, Track,
    },
    utils,
};

pub const PLAYLIST_TRACKS_PAGE_LIMIT: u32 = 100;
pub const USER_PLAYLISTS_PAGE_LIMIT: u32 = 50;

/// Reads what a playlist already holds and works out what is missing.
#[derive(Clone)]
pub struct PlaylistDiffer {
    client: SpotifyClient,
}

impl PlaylistDiffer {
    pub fn new(client: SpotifyClient) -> Self {
        Self { client }
    }

    /// Ids of every track currently in the playlist.
    ///
    /// Removed tracks (null entries) and local files (no id) are skipped.
    pub async fn existing_track_ids(
        &self,
        playlist_id: &str,
        token: &str,
    ) -> Result<PlaylistTrackSet> {
        let url = self.client.url(&format!(
            "/playlists/{id}/tracks?limit={limit}&fields=items(track(id)),next",
            id = playlist_id,
            limit = PLAYLIST_TRACKS_PAGE_LIMIT
        ));

        let items = PagedFetcher::<PlaylistItem>::new(self.client.transport(), url, token)
            .collect_all()
            .await?;

        Ok(items
            .into_iter()
            .filter_map(|item| item.track.and_then(|t| t.id))
            .filter(|id| !id.is_empty())
            .collect())
    }

    /// Catalog tracks whose id is not in `existing`, in catalog iteration order.
    pub fn diff<'c>(catalog: &'c ArtistCatalog, existing: &PlaylistTrackSet) -> Vec<&'c Track> {
        catalog
            .iter()
            .filter(|track| !existing.contains(&track.id))
            .collect()
    }
}

/// Appends tracks to a playlist in fixed-size chunks.
#[derive(Clone)]
pub struct BatchMutator {
    client: SpotifyClient,
    chunk_size: usize,
}

impl BatchMutator {
    pub fn new(client: SpotifyClient) -> Self {
        Self::with_chunk_size(client, DEFAULT_CHUNK_SIZE)
    }

    pub fn with_chunk_size(client: SpotifyClient, chunk_size: usize) -> Self {
        Self { client, chunk_size }
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Adds `uris` to the playlist, one `POST /playlists/{id}/tracks` per chunk.
    ///
    /// Chunks are sent sequentially in input order. Both `201 Created` and
    /// `200 OK` count as success since the API has answered with either.
    ///
    /// # Returns
    ///
    /// - `Ok(n)` - all `n` tracks were added
    /// - `Err(SyncError::UpstreamWrite { added, playlist_id, .. })` - chunk `k`
    ///   failed; `added` is `k * chunk_size`, `playlist_id` names the playlist
    ///   and nothing after chunk `k` was sent
    ///
    /// A failed chunk is not retried. An empty `uris` list sends nothing.
    ///
    /// # Example
    ///
    /// ```
    /// match mutator.add_tracks(&playlist_id, &uris, token).await {
    ///     Ok(n) => success!("Added {} tracks", n),
    ///     Err(e) => warning!("Stopped after {:?} tracks: {}", e.added_before_failure(), e),
    /// }
    /// ```
    pub async fn add_tracks(&self, playlist_id: &str, uris: &[String], token: &str) -> Result<usize> {
        if self.chunk_size == 0 {
            return Err(SyncError::BadInput("chunk size must be positive".to_string()));
        }

        let url = self
            .client
            .url(&format!("/playlists/{id}/tracks", id = playlist_id));
        let total_chunks = utils::chunk_count(uris.len(), self.chunk_size);
        let write_error = |added: usize, status: Option<u16>, message: String| {
            SyncError::UpstreamWrite {
                stage: Stage::AddTracks,
                added,
                playlist_id: Some(playlist_id.to_string()),
                status,
                message,
            }
        };
        let mut added = 0;

        for (index, chunk) in uris.chunks(self.chunk_size).enumerate() {
            let body = AddTrackToPlaylistRequest {
                uris: chunk.to_vec(),
            };
            let body = serde_json::to_value(&body)
                .map_err(|e| write_error(added, None, e.to_string()))?;

            let response = self
                .client
                .transport()
                .post_json(&url, token, body)
                .await
                .map_err(|e| write_error(added, None, e.to_string()))?;

            if response.status != 200 && response.status != 201 {
                return Err(write_error(added, Some(response.status), response.body));
            }

            added += chunk.len();
            info!(
                "Added chunk {}/{} ({} tracks) to playlist {}",
                index + 1,
                total_chunks,
                chunk.len(),
                playlist_id
            );
        }

        Ok(added)
    }
}

impl SpotifyClient {
    /// Creates a private playlist owned by `user_id` and returns it.
    pub async fn create_playlist(
        &self,
        user_id: &str,
        name: &str,
        description: &str,
        token: &str,
    ) -> Result<CreatePlaylistResponse> {
        let url = self.url(&format!("/users/{user_id}/playlists", user_id = user_id));
        let write_error = |status: Option<u16>, message: String| SyncError::UpstreamWrite {
            stage: Stage::CreatePlaylist,
            added: 0,
            playlist_id: None,
            status,
            message,
        };

        let body = serde_json::to_value(CreatePlaylistRequest {
            name: name.to_string(),
            description: description.to_string(),
            public: false,
            collaborative: false,
        })
        .map_err(|e| write_error(None, e.to_string()))?;

        let response = self
            .transport()
            .post_json(&url, token, body)
            .await
            .map_err(|e| write_error(None, e.to_string()))?;

        if response.status != 200 && response.status != 201 {
            return Err(write_error(Some(response.status), response.body));
        }

        response
            .decode::<CreatePlaylistResponse>(&url)
            .map_err(|e| write_error(Some(response.status), e.to_string()))
    }

    /// Every playlist the caller owns or follows.
    pub async fn user_playlists(&self, token: &str) -> Result<Vec<Playlist>> {
        let url = self.url(&format!(
            "/me/playlists?limit={limit}",
            limit = USER_PLAYLISTS_PAGE_LIMIT
        ));
        PagedFetcher::<Playlist>::new(self.transport(), url, token)
            .collect_all()
            .await
    }
}
