use discosync::SyncError;
use discosync::types::{Album, ArtistCatalog, ArtistRef, Track};
use discosync::utils::*;

// Helper function to create a test album
fn create_test_album(id: &str, release_date: &str) -> Album {
    Album {
        id: id.to_string(),
        name: format!("Album {}", id),
        release_date: release_date.to_string(),
        release_date_precision: "day".to_string(),
        album_type: "album".to_string(),
    }
}

// Helper function to create a test track credited to `artist_id`
fn create_test_track(id: &str, album_id: &str, artist_id: &str, track_number: u32) -> Track {
    Track {
        id: id.to_string(),
        name: format!("Track {}", id),
        uri: format!("spotify:track:{}", id),
        album_id: album_id.to_string(),
        artists: vec![ArtistRef {
            id: artist_id.to_string(),
            name: "Test Artist".to_string(),
        }],
        disc_number: 1,
        track_number,
    }
}

fn create_test_catalog(albums: &[Album], tracks: Vec<Track>) -> ArtistCatalog {
    let mut catalog = ArtistCatalog::new("artist1");
    for album in albums {
        catalog.release_dates.insert(album);
    }
    for track in tracks {
        catalog.insert(track);
    }
    catalog
}

fn ids(tracks: &[&Track]) -> Vec<String> {
    tracks.iter().map(|t| t.id.clone()).collect()
}

#[test]
fn test_parse_artist_id_from_url() {
    let id = parse_artist_id("https://open.spotify.com/artist/4NHQUGzhtTLFvgF5SZesLK").unwrap();
    assert_eq!(id, "4NHQUGzhtTLFvgF5SZesLK");
}

#[test]
fn test_parse_artist_id_strips_query_and_fragment() {
    let id =
        parse_artist_id("https://open.spotify.com/artist/4NHQUGzhtTLFvgF5SZesLK?si=abc123").unwrap();
    assert_eq!(id, "4NHQUGzhtTLFvgF5SZesLK");

    let id = parse_artist_id("https://open.spotify.com/intl-de/artist/0OdUWJ0sBjDrqHygGUXeCF#top")
        .unwrap();
    assert_eq!(id, "0OdUWJ0sBjDrqHygGUXeCF");
}

#[test]
fn test_parse_artist_id_from_uri_and_bare_id() {
    assert_eq!(
        parse_artist_id("spotify:artist:4NHQUGzhtTLFvgF5SZesLK").unwrap(),
        "4NHQUGzhtTLFvgF5SZesLK"
    );
    assert_eq!(
        parse_artist_id("  4NHQUGzhtTLFvgF5SZesLK ").unwrap(),
        "4NHQUGzhtTLFvgF5SZesLK"
    );
}

#[test]
fn test_parse_artist_id_rejects_invalid_references() {
    let invalid = [
        "",
        "   ",
        "https://open.spotify.com/album/4NHQUGzhtTLFvgF5SZesLK",
        "https://open.spotify.com/artist/",
        "https://open.spotify.com/artist",
        "spotify:artist:",
        "spotify:track:4NHQUGzhtTLFvgF5SZesLK",
        "not an id",
    ];

    for reference in invalid {
        match parse_artist_id(reference) {
            Err(SyncError::BadInput(_)) => {}
            other => panic!("expected BadInput for {:?}, got {:?}", reference, other),
        }
    }
}

#[test]
fn test_tracks_by_release_date_oldest_first() {
    let albums = vec![
        create_test_album("newer", "2020-01-01"),
        create_test_album("older", "2019-06-01"),
    ];
    let catalog = create_test_catalog(
        &albums,
        vec![
            create_test_track("x", "newer", "artist1", 1),
            create_test_track("y", "older", "artist1", 1),
        ],
    );

    let ordered = tracks_by_release_date(&catalog);

    assert_eq!(ids(&ordered), vec!["y", "x"]);
}

#[test]
fn test_tracks_by_release_date_unknown_dates_first() {
    let albums = vec![
        create_test_album("dated", "2001-05-05"),
        create_test_album("undated", ""),
    ];
    let catalog = create_test_catalog(
        &albums,
        vec![
            create_test_track("a", "dated", "artist1", 1),
            create_test_track("b", "undated", "artist1", 1),
            // album never listed, so no release date at all
            create_test_track("c", "ghost", "artist1", 1),
        ],
    );

    let ordered = tracks_by_release_date(&catalog);

    assert_eq!(ordered.last().unwrap().id, "a");
    assert_eq!(catalog.release_dates.release_date("ghost"), "");
}

#[test]
fn test_tracks_by_release_date_ties_are_stable() {
    // Year precision dates compare lexicographically before full dates
    let albums = vec![
        create_test_album("b_album", "2010"),
        create_test_album("a_album", "2010"),
    ];
    let catalog = create_test_catalog(
        &albums,
        vec![
            create_test_track("t3", "b_album", "artist1", 1),
            create_test_track("t2", "a_album", "artist1", 2),
            create_test_track("t1", "a_album", "artist1", 1),
        ],
    );

    for _ in 0..5 {
        let ordered = tracks_by_release_date(&catalog);
        assert_eq!(ids(&ordered), vec!["t1", "t2", "t3"]);
    }
}

#[test]
fn test_chunk_count() {
    assert_eq!(chunk_count(0, 100), 0);
    assert_eq!(chunk_count(1, 100), 1);
    assert_eq!(chunk_count(100, 100), 1);
    assert_eq!(chunk_count(101, 100), 2);
    assert_eq!(chunk_count(250, 100), 3);
    assert_eq!(chunk_count(10, 0), 0);
}

#[test]
fn test_remove_duplicate_albums() {
    let mut albums = vec![
        create_test_album("1", "2023-01-01"),
        create_test_album("2", "2023-01-02"),
        create_test_album("1", "2023-01-01"),
        create_test_album("3", "2023-01-03"),
    ];

    remove_duplicate_albums(&mut albums);

    assert_eq!(albums.len(), 3);
    let ids: Vec<&str> = albums.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2", "3"]);
}

#[test]
fn test_remove_duplicate_albums_empty() {
    let mut albums: Vec<Album> = vec![];
    remove_duplicate_albums(&mut albums);
    assert!(albums.is_empty());
}

#[test]
fn test_catalog_insert_filters_and_dedups() {
    let mut catalog = ArtistCatalog::new("artist1");

    assert!(catalog.insert(create_test_track("t1", "a", "artist1", 1)));
    assert!(!catalog.insert(create_test_track("t2", "a", "someone_else", 2)));
    assert!(!catalog.insert(create_test_track("", "a", "artist1", 3)));
    // Same track seen on a second release
    assert!(catalog.insert(create_test_track("t1", "b", "artist1", 1)));

    assert_eq!(catalog.len(), 1);
    assert!(catalog.contains("t1"));
    assert!(!catalog.contains("t2"));
}

#[test]
fn test_release_date_index() {
    let mut catalog = ArtistCatalog::new("artist1");
    catalog
        .release_dates
        .insert(&create_test_album("a", "1999-12-31"));
    catalog
        .release_dates
        .insert(&create_test_album("b", "2000"));

    assert_eq!(catalog.release_dates.len(), 2);
    assert_eq!(catalog.release_dates.release_date("a"), "1999-12-31");
    assert_eq!(catalog.release_dates.release_date("missing"), "");

    let mut album_ids: Vec<&str> = catalog.release_dates.album_ids().collect();
    album_ids.sort();
    assert_eq!(album_ids, vec!["a", "b"]);
}
