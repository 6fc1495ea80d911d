use crate::{
    errors::Result,
    info,
    spotify::{SpotifyClient, paging::PagedFetcher},
    types::{Album, ArtistCatalog, CatalogBuild, SkippedAlbum, Track},
    utils, warning,
};

/// Release groups requested from `/artists/{id}/albums`.
pub const INCLUDE_GROUPS: &str = "album,single";
pub const ALBUM_PAGE_LIMIT: u32 = 50;
pub const TRACK_PAGE_LIMIT: u32 = 50;

/// Builds the complete track catalog of an artist.
#[derive(Clone)]
pub struct CatalogBuilder {
    client: SpotifyClient,
}

impl CatalogBuilder {
    pub fn new(client: SpotifyClient) -> Self {
        Self { client }
    }

    /// Walks every album and single of `artist_id` and collects the tracks
    /// that credit the artist, keyed by track id.
    ///
    /// The album listing also fills the catalog's release-date index, so no
    /// second pass over the albums is ever needed.
    ///
    /// # Partial failure
    ///
    /// Only a failure of the album listing itself is returned as an error.
    /// When the track listing of a single album fails, that album is skipped,
    /// logged, and reported in [`CatalogBuild::skipped`]. An artist without
    /// tracks produces an empty catalog, not an error.
    ///
    /// # Example
    ///
    /// ```
    /// let build = CatalogBuilder::new(client).build_catalog("4NHQUGzhtTLFvgF5SZesLK", token).await?;
    /// println!("{} tracks, {} albums skipped", build.catalog.len(), build.skipped.len());
    /// ```
    pub async fn build_catalog(&self, artist_id: &str, token: &str) -> Result<CatalogBuild> {
        let mut albums = self.artist_albums(artist_id, token).await?;
        utils::remove_duplicate_albums(&mut albums);

        let mut catalog = ArtistCatalog::new(artist_id);
        let mut skipped = Vec::new();
        for album in &albums {
            catalog.release_dates.insert(album);
        }

        for album in &albums {
            match self.album_tracks(&album.id, token).await {
                Ok(tracks) => {
                    for mut track in tracks {
                        track.album_id = album.id.clone();
                        catalog.insert(track);
                    }
                }
                Err(e) => {
                    warning!("Could not fetch tracks for album {}: {}", album.id, e);
                    skipped.push(SkippedAlbum {
                        album_id: album.id.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        info!(
            "Catalog for artist {}: {} tracks from {} releases ({} skipped)",
            artist_id,
            catalog.len(),
            albums.len(),
            skipped.len()
        );

        Ok(CatalogBuild { catalog, skipped })
    }

    /// Albums and singles of an artist, in the order the API lists them.
    pub async fn artist_albums(&self, artist_id: &str, token: &str) -> Result<Vec<Album>> {
        let url = self.client.url(&format!(
            "/artists/{id}/albums?include_groups={groups}&limit={limit}",
            id = artist_id,
            groups = INCLUDE_GROUPS,
            limit = ALBUM_PAGE_LIMIT
        ));
        PagedFetcher::<Album>::new(self.client.transport(), url, token)
            .collect_all()
            .await
    }

    async fn album_tracks(&self, album_id: &str, token: &str) -> Result<Vec<Track>> {
        let url = self.client.url(&format!(
            "/albums/{id}/tracks?limit={limit}",
            id = album_id,
            limit = TRACK_PAGE_LIMIT
        ));
        PagedFetcher::<Track>::new(self.client.transport(), url, token)
            .collect_all()
            .await
    }
}
