#![allow(dead_code)]

use std::{
    collections::{HashMap, VecDeque},
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use discosync::{
    Result,
    management::Clock,
    spotify::{RawResponse, SpotifyClient, Transport},
};
use serde_json::{Value, json};

pub const API: &str = "http://fake/v1";
pub const TOKEN: &str = "test-token";

/// In-memory stand-in for the Spotify API.
///
/// GETs are answered from registered responses, matched on the full URL
/// first and on the URL without its query string second. Anything not
/// registered is a 404. POSTs are answered from a queue and default to a
/// `201` carrying a playlist with id `pl1`.
#[derive(Default)]
pub struct FakeTransport {
    routes: Mutex<HashMap<String, RawResponse>>,
    post_responses: Mutex<VecDeque<RawResponse>>,
    gets: Mutex<Vec<String>>,
    posts: Mutex<Vec<(String, Value)>>,
}

impl FakeTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn on_get(&self, url: &str, response: RawResponse) {
        self.routes
            .lock()
            .unwrap()
            .insert(url.to_string(), response);
    }

    pub fn on_get_page(&self, url: &str, items: Vec<Value>, next: Option<&str>) {
        let body = json!({ "items": items, "next": next });
        self.on_get(url, RawResponse::new(200, body.to_string()));
    }

    pub fn push_post(&self, response: RawResponse) {
        self.post_responses.lock().unwrap().push_back(response);
    }

    pub fn gets(&self) -> Vec<String> {
        self.gets.lock().unwrap().clone()
    }

    pub fn gets_containing(&self, fragment: &str) -> usize {
        self.gets().iter().filter(|url| url.contains(fragment)).count()
    }

    pub fn posts(&self) -> Vec<(String, Value)> {
        self.posts.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn get(&self, url: &str, _token: &str) -> Result<RawResponse> {
        self.gets.lock().unwrap().push(url.to_string());

        let routes = self.routes.lock().unwrap();
        let path = url.split('?').next().unwrap_or(url);
        Ok(routes
            .get(url)
            .or_else(|| routes.get(path))
            .cloned()
            .unwrap_or_else(|| RawResponse::new(404, r#"{"error":"not found"}"#)))
    }

    async fn post_json(&self, url: &str, _token: &str, body: Value) -> Result<RawResponse> {
        self.posts.lock().unwrap().push((url.to_string(), body));
        Ok(self
            .post_responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                RawResponse::new(
                    201,
                    r#"{"id":"pl1","uri":"spotify:playlist:pl1","name":"Test"}"#,
                )
            }))
    }
}

pub fn client(fake: &Arc<FakeTransport>) -> SpotifyClient {
    SpotifyClient::new(fake.clone(), API)
}

/// Clock that only moves when told to.
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(now: DateTime<Utc>) -> Arc<Self> {
        Arc::new(Self {
            now: Mutex::new(now),
        })
    }

    pub fn starting_at_epoch() -> Arc<Self> {
        Self::new(Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap())
    }

    pub fn advance(&self, by: TimeDelta) {
        let mut now = self.now.lock().unwrap();
        *now += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

pub fn album_json(id: &str, release_date: &str) -> Value {
    json!({
        "id": id,
        "name": format!("Album {}", id),
        "release_date": release_date,
        "release_date_precision": "day",
        "album_type": "album",
    })
}

pub fn track_json(id: &str, artist_ids: &[&str]) -> Value {
    let artists: Vec<Value> = artist_ids
        .iter()
        .map(|artist| json!({ "id": artist, "name": format!("Artist {}", artist) }))
        .collect();
    json!({
        "id": id,
        "name": format!("Track {}", id),
        "uri": format!("spotify:track:{}", id),
        "artists": artists,
        "disc_number": 1,
        "track_number": 1,
    })
}

pub fn albums_url(artist_id: &str) -> String {
    format!("{}/artists/{}/albums", API, artist_id)
}

pub fn album_tracks_url(album_id: &str) -> String {
    format!("{}/albums/{}/tracks", API, album_id)
}

pub fn playlist_tracks_url(playlist_id: &str) -> String {
    format!("{}/playlists/{}/tracks", API, playlist_id)
}

/// Registers a one-page album listing for `artist_id` and one track page
/// per album. Every track credits the artist.
pub fn register_artist(fake: &FakeTransport, artist_id: &str, albums: &[(&str, &str, &[&str])]) {
    let listing = albums
        .iter()
        .map(|(album_id, date, _)| album_json(album_id, date))
        .collect();
    fake.on_get_page(&albums_url(artist_id), listing, None);

    for (album_id, _, track_ids) in albums {
        let tracks = track_ids
            .iter()
            .map(|track_id| track_json(track_id, &[artist_id]))
            .collect();
        fake.on_get_page(&album_tracks_url(album_id), tracks, None);
    }
}

/// Registers a one-page playlist listing holding `track_ids`.
pub fn register_playlist(fake: &FakeTransport, playlist_id: &str, track_ids: &[&str]) {
    let items = track_ids
        .iter()
        .map(|id| json!({ "track": { "id": id } }))
        .collect();
    fake.on_get_page(&playlist_tracks_url(playlist_id), items, None);
}
