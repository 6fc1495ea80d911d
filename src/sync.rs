//! The two user-facing sync operations.
//!
//! Both are a fixed, fail-fast sequence of stages and keep no state beyond
//! a single call:
//!
//! ```text
//! create:  validate → catalog (cache) → not empty → sort by release date
//!          → create playlist → add tracks in chunks
//! augment: validate → catalog (cache) → not empty → existing playlist tracks
//!          → diff → add missing tracks in chunks
//! ```

use crate::{
    errors::{Result, Stage, SyncError},
    info,
    management::CatalogCache,
    spotify::{
        SpotifyClient,
        playlist::{BatchMutator, PlaylistDiffer},
    },
    success,
    types::{
        ArtistCatalog, AugmentOutcome, CreateOutcome, Credential, PlaylistTarget, SyncOutcome,
        SyncRequest,
    },
    utils,
};

pub struct SyncOrchestrator {
    client: SpotifyClient,
    cache: CatalogCache,
    differ: PlaylistDiffer,
    mutator: BatchMutator,
}

impl SyncOrchestrator {
    pub fn new(
        client: SpotifyClient,
        cache: CatalogCache,
        differ: PlaylistDiffer,
        mutator: BatchMutator,
    ) -> Self {
        Self {
            client,
            cache,
            differ,
            mutator,
        }
    }

    pub fn cache(&self) -> &CatalogCache {
        &self.cache
    }

    /// Dispatches a request to the matching operation.
    pub async fn run(&self, request: &SyncRequest) -> Result<SyncOutcome> {
        match &request.target {
            PlaylistTarget::New { name } => self
                .create_from_artist(&request.artist_ref, name, &request.credential)
                .await
                .map(SyncOutcome::Created),
            PlaylistTarget::Existing { playlist_id } => self
                .augment_playlist(&request.artist_ref, playlist_id, &request.credential)
                .await
                .map(SyncOutcome::Augmented),
        }
    }

    /// Creates a playlist holding every track of the artist, oldest first.
    pub async fn create_from_artist(
        &self,
        artist_ref: &str,
        playlist_name: &str,
        credential: &Credential,
    ) -> Result<CreateOutcome> {
        validate_credential(credential)?;
        if credential.user_id.trim().is_empty() {
            return Err(SyncError::Unauthenticated(
                "User not authenticated - no user id".to_string(),
            ));
        }
        let playlist_name = playlist_name.trim();
        if playlist_name.is_empty() {
            return Err(SyncError::BadInput("Playlist name is required".to_string()));
        }
        let artist_id = utils::parse_artist_id(artist_ref)?;

        let catalog = self.catalog(&artist_id, credential).await?;
        let uris: Vec<String> = utils::tracks_by_release_date(&catalog)
            .into_iter()
            .map(|track| track.uri.clone())
            .collect();

        let playlist = self
            .client
            .create_playlist(
                &credential.user_id,
                playlist_name,
                &format!("Every track by artist {}, oldest first.", artist_id),
                &credential.access_token,
            )
            .await?;
        info!(
            "Playlist \"{}\" created ({}). Adding {} tracks…",
            playlist_name,
            playlist.id,
            uris.len()
        );

        let added = self
            .mutator
            .add_tracks(&playlist.id, &uris, &credential.access_token)
            .await?;
        success!(
            "Playlist '{}' created and {} tracks added.",
            playlist_name,
            added
        );

        Ok(CreateOutcome {
            playlist_id: playlist.id,
            track_count: added,
        })
    }

    /// Appends the artist's tracks that the playlist does not contain yet.
    pub async fn augment_playlist(
        &self,
        artist_ref: &str,
        playlist_id: &str,
        credential: &Credential,
    ) -> Result<AugmentOutcome> {
        validate_credential(credential)?;
        let playlist_id = playlist_id.trim();
        if playlist_id.is_empty() {
            return Err(SyncError::BadInput(
                "playlist_id and artist_url are required".to_string(),
            ));
        }
        let artist_id = utils::parse_artist_id(artist_ref)?;

        let catalog = self.catalog(&artist_id, credential).await?;
        let existing = self
            .differ
            .existing_track_ids(playlist_id, &credential.access_token)
            .await
            .map_err(|e| SyncError::upstream_read(Stage::PlaylistListing, e))?;

        let missing: Vec<String> = PlaylistDiffer::diff(&catalog, &existing)
            .into_iter()
            .map(|track| track.uri.clone())
            .collect();

        if missing.is_empty() {
            success!("All artist tracks are already in playlist {}", playlist_id);
            return Ok(AugmentOutcome { added_count: 0 });
        }

        let added = self
            .mutator
            .add_tracks(playlist_id, &missing, &credential.access_token)
            .await?;
        success!(
            "Added {} missing artist tracks to playlist {}",
            added,
            playlist_id
        );

        Ok(AugmentOutcome { added_count: added })
    }

    async fn catalog(&self, artist_id: &str, credential: &Credential) -> Result<ArtistCatalog> {
        let catalog = self
            .cache
            .get_or_build(artist_id, &credential.access_token)
            .await
            .map_err(|e| SyncError::upstream_read(Stage::AlbumListing, e))?;

        if catalog.is_empty() {
            return Err(SyncError::NotFound(
                "No tracks found for this artist".to_string(),
            ));
        }
        Ok(catalog)
    }
}

fn validate_credential(credential: &Credential) -> Result<()> {
    if credential.access_token.trim().is_empty() {
        return Err(SyncError::Unauthenticated(
            "User not authenticated - empty token".to_string(),
        ));
    }
    Ok(())
}
