use std::{cmp::Ordering, collections::HashSet};

use crate::{
    errors::{Result, SyncError},
    types::{Album, ArtistCatalog, Track},
};

/// Extracts the artist id from an artist reference.
///
/// Accepted forms:
/// - a URL with an `artist` path segment, e.g.
///   `https://open.spotify.com/artist/4NHQUGzhtTLFvgF5SZesLK?si=abc`
/// - a Spotify URI, e.g. `spotify:artist:4NHQUGzhtTLFvgF5SZesLK`
/// - a bare alphanumeric id
///
/// The segment directly after `artist` is taken; query string and fragment
/// are dropped. Anything else is `SyncError::BadInput`.
pub fn parse_artist_id(reference: &str) -> Result<String> {
    let reference = reference.trim();
    let invalid = || SyncError::BadInput(format!("Invalid artist URL: {:?}", reference));

    if reference.is_empty() {
        return Err(invalid());
    }

    if let Some(id) = reference.strip_prefix("spotify:artist:") {
        return validate_id(id).ok_or_else(invalid);
    }

    if !reference.contains('/') && !reference.contains(':') {
        return validate_id(reference).ok_or_else(invalid);
    }

    let without_suffix = reference
        .split(['?', '#'])
        .next()
        .unwrap_or_default();
    let parts: Vec<&str> = without_suffix.split('/').collect();
    parts
        .iter()
        .position(|part| *part == "artist")
        .and_then(|i| parts.get(i + 1))
        .and_then(|id| validate_id(id))
        .ok_or_else(invalid)
}

fn validate_id(id: &str) -> Option<String> {
    if !id.is_empty() && id.chars().all(|c| c.is_ascii_alphanumeric()) {
        Some(id.to_string())
    } else {
        None
    }
}

/// Orders tracks oldest release first.
///
/// Ties on the release date fall back to album id, then disc and track
/// number, then track id, so the result does not depend on catalog
/// iteration order. Unknown release dates are `""` and come first.
pub fn compare_by_release_date(catalog: &ArtistCatalog, a: &Track, b: &Track) -> Ordering {
    let a_date = catalog.release_dates.release_date(&a.album_id);
    let b_date = catalog.release_dates.release_date(&b.album_id);

    a_date
        .cmp(b_date)
        .then_with(|| a.album_id.cmp(&b.album_id))
        .then_with(|| a.disc_number.cmp(&b.disc_number))
        .then_with(|| a.track_number.cmp(&b.track_number))
        .then_with(|| a.id.cmp(&b.id))
}

/// All catalog tracks in chronological order.
pub fn tracks_by_release_date(catalog: &ArtistCatalog) -> Vec<&Track> {
    let mut tracks: Vec<&Track> = catalog.iter().collect();
    tracks.sort_by(|a, b| compare_by_release_date(catalog, a, b));
    tracks
}

/// Number of write calls needed for `len` items at `chunk_size` per call.
pub fn chunk_count(len: usize, chunk_size: usize) -> usize {
    if chunk_size == 0 {
        return 0;
    }
    len.div_ceil(chunk_size)
}

/// Keeps the first occurrence of every album id.
pub fn remove_duplicate_albums(albums: &mut Vec<Album>) {
    let mut seen_ids = HashSet::new();
    albums.retain(|album| seen_ids.insert(album.id.clone()));
}
