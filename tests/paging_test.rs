mod support;

use discosync::{
    SyncError,
    spotify::{RawResponse, paging::PagedFetcher},
    types::Album,
};
use support::{FakeTransport, TOKEN, album_json};

const FIRST: &str = "http://fake/v1/things?limit=2";
const SECOND: &str = "http://fake/v1/things?offset=2&limit=2";

#[tokio::test]
async fn test_follows_next_until_absent() {
    let fake = FakeTransport::new();
    fake.on_get_page(
        FIRST,
        vec![album_json("a1", "2001"), album_json("a2", "2002")],
        Some(SECOND),
    );
    fake.on_get_page(SECOND, vec![album_json("a3", "2003")], None);

    let mut pages = PagedFetcher::<Album>::new(&*fake, FIRST, TOKEN);

    let first = pages.next_page().await.unwrap().unwrap();
    assert_eq!(first.len(), 2);
    assert!(!pages.is_exhausted());

    let second = pages.next_page().await.unwrap().unwrap();
    assert_eq!(second[0].id, "a3");
    assert!(pages.is_exhausted());
    assert_eq!(pages.pages_fetched(), 2);

    assert!(pages.next_page().await.unwrap().is_none());
    assert_eq!(fake.gets(), vec![FIRST.to_string(), SECOND.to_string()]);
}

#[tokio::test]
async fn test_empty_next_ends_traversal() {
    let fake = FakeTransport::new();
    fake.on_get_page(FIRST, vec![album_json("a1", "2001")], Some(""));

    let albums = PagedFetcher::<Album>::new(&*fake, FIRST, TOKEN)
        .collect_all()
        .await
        .unwrap();

    assert_eq!(albums.len(), 1);
    assert_eq!(fake.gets().len(), 1);
}

#[tokio::test]
async fn test_empty_listing() {
    let fake = FakeTransport::new();
    fake.on_get_page(FIRST, vec![], None);

    let albums = PagedFetcher::<Album>::new(&*fake, FIRST, TOKEN)
        .collect_all()
        .await
        .unwrap();

    assert!(albums.is_empty());
}

#[tokio::test]
async fn test_error_status_is_remote_read_and_exhausts() {
    let fake = FakeTransport::new();
    fake.on_get_page(FIRST, vec![album_json("a1", "2001")], Some(SECOND));
    fake.on_get(SECOND, RawResponse::new(503, "upstream down"));

    let mut pages = PagedFetcher::<Album>::new(&*fake, FIRST, TOKEN);
    assert!(pages.next_page().await.unwrap().is_some());

    match pages.next_page().await {
        Err(SyncError::RemoteRead { status, body }) => {
            assert_eq!(status, 503);
            assert_eq!(body, "upstream down");
        }
        other => panic!("expected RemoteRead, got {:?}", other),
    }

    // No restart after a failure
    assert!(pages.is_exhausted());
    assert!(pages.next_page().await.unwrap().is_none());
    assert_eq!(fake.gets().len(), 2);
}

#[tokio::test]
async fn test_collect_all_discards_partial_results_on_failure() {
    let fake = FakeTransport::new();
    fake.on_get_page(FIRST, vec![album_json("a1", "2001")], Some(SECOND));
    fake.on_get(SECOND, RawResponse::new(500, ""));

    let result = PagedFetcher::<Album>::new(&*fake, FIRST, TOKEN)
        .collect_all()
        .await;

    assert!(matches!(result, Err(SyncError::RemoteRead { status: 500, .. })));
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let fake = FakeTransport::new();
    fake.on_get(FIRST, RawResponse::new(200, "<html>not json</html>"));

    let result = PagedFetcher::<Album>::new(&*fake, FIRST, TOKEN)
        .collect_all()
        .await;

    match result {
        Err(SyncError::Decode { url, .. }) => assert_eq!(url, FIRST),
        other => panic!("expected Decode, got {:?}", other),
    }
}
