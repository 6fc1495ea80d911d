mod support;

use discosync::{SyncError, spotify::RawResponse, spotify::catalog::CatalogBuilder};
use support::{
    FakeTransport, TOKEN, album_json, album_tracks_url, albums_url, client, register_artist,
    track_json,
};

const ARTIST: &str = "artist1";

#[tokio::test]
async fn test_build_catalog_collects_credited_tracks() {
    let fake = FakeTransport::new();
    let first_page = format!(
        "{}?include_groups=album,single&limit=50",
        albums_url(ARTIST)
    );
    let second_page = format!("{}?offset=50&limit=50", albums_url(ARTIST));
    fake.on_get_page(
        &first_page,
        vec![album_json("alb1", "2019-05-01")],
        Some(&second_page),
    );
    // The second page lists alb1 again next to a single
    fake.on_get_page(
        &second_page,
        vec![album_json("alb2", "2020-02-02"), album_json("alb1", "2019-05-01")],
        None,
    );
    fake.on_get_page(
        &album_tracks_url("alb1"),
        vec![
            track_json("t1", &[ARTIST]),
            track_json("t2", &["guest", ARTIST]),
            track_json("t3", &["someone_else"]),
        ],
        None,
    );
    fake.on_get_page(
        &album_tracks_url("alb2"),
        vec![track_json("t1", &[ARTIST]), track_json("t4", &[ARTIST])],
        None,
    );

    let build = CatalogBuilder::new(client(&fake))
        .build_catalog(ARTIST, TOKEN)
        .await
        .unwrap();
    let catalog = build.catalog;

    assert_eq!(catalog.artist_id, ARTIST);
    assert_eq!(catalog.len(), 3);
    assert!(catalog.contains("t1"));
    assert!(catalog.contains("t2"));
    assert!(catalog.contains("t4"));
    assert!(!catalog.contains("t3"));
    assert!(build.skipped.is_empty());

    assert_eq!(catalog.release_dates.len(), 2);
    assert_eq!(catalog.release_dates.release_date("alb1"), "2019-05-01");
    assert_eq!(catalog.tracks["t4"].album_id, "alb2");

    // Duplicate album entries are walked once
    assert_eq!(fake.gets_containing("/albums/alb1/tracks"), 1);
    assert_eq!(fake.gets_containing("/artists/artist1/albums"), 2);
}

#[tokio::test]
async fn test_album_track_failure_is_skipped() {
    let fake = FakeTransport::new();
    register_artist(
        &fake,
        ARTIST,
        &[("alb1", "2019-01-01", &["t1", "t2"]), ("alb2", "2020-01-01", &["t3"])],
    );
    fake.on_get(&album_tracks_url("alb2"), RawResponse::new(500, "boom"));

    let build = CatalogBuilder::new(client(&fake))
        .build_catalog(ARTIST, TOKEN)
        .await
        .unwrap();

    assert_eq!(build.catalog.len(), 2);
    assert!(!build.catalog.contains("t3"));
    assert_eq!(build.skipped.len(), 1);
    assert_eq!(build.skipped[0].album_id, "alb2");
    // The release date is known even though the tracks are not
    assert_eq!(build.catalog.release_dates.release_date("alb2"), "2020-01-01");
}

#[tokio::test]
async fn test_album_listing_failure_is_fatal() {
    let fake = FakeTransport::new();
    fake.on_get(&albums_url(ARTIST), RawResponse::new(502, "bad gateway"));

    let result = CatalogBuilder::new(client(&fake))
        .build_catalog(ARTIST, TOKEN)
        .await;

    assert!(matches!(result, Err(SyncError::RemoteRead { status: 502, .. })));
    assert_eq!(fake.gets_containing("/tracks"), 0);
}

#[tokio::test]
async fn test_artist_without_releases_is_empty_catalog() {
    let fake = FakeTransport::new();
    register_artist(&fake, ARTIST, &[]);

    let build = CatalogBuilder::new(client(&fake))
        .build_catalog(ARTIST, TOKEN)
        .await
        .unwrap();

    assert!(build.catalog.is_empty());
    assert!(build.catalog.release_dates.is_empty());
}

#[tokio::test]
async fn test_artist_albums_requests_albums_and_singles() {
    let fake = FakeTransport::new();
    register_artist(&fake, ARTIST, &[("alb1", "2019", &[])]);

    let albums = CatalogBuilder::new(client(&fake))
        .artist_albums(ARTIST, TOKEN)
        .await
        .unwrap();

    assert_eq!(albums.len(), 1);
    assert_eq!(
        fake.gets(),
        vec!["http://fake/v1/artists/artist1/albums?include_groups=album,single&limit=50"]
    );
}
