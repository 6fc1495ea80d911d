use tabled::Table;

use crate::{
    app::App,
    cli::{build_app, spinner},
    error, info, success,
    types::{Credential, PlaylistTableRow},
    warning,
};

async fn login(app: &App, token: &str) -> Credential {
    let pb = spinner("Checking access token...");
    let credential = app.client.authenticate(token).await;
    pb.finish_and_clear();

    match credential {
        Ok(credential) => credential,
        Err(e) => error!(
            "{}\nPass a valid token with --token or SPOTIFY_ACCESS_TOKEN.",
            e
        ),
    }
}

pub async fn create(artist: &str, name: &str, token: &str) {
    let app = build_app();
    let credential = login(&app, token).await;

    info!("Creating playlist \"{}\" for {}", name, artist);
    match app
        .orchestrator
        .create_from_artist(artist, name, &credential)
        .await
    {
        Ok(outcome) => success!(
            "Playlist {} holds {} tracks",
            outcome.playlist_id,
            outcome.track_count
        ),
        Err(e) => match (e.added_before_failure(), e.playlist_id()) {
            (Some(added), Some(playlist_id)) => error!(
                "Stopped after adding {} tracks to playlist {}: {}\nRun `augment --playlist {}` to add the rest.",
                added,
                playlist_id,
                e,
                playlist_id
            ),
            (Some(added), None) => error!("Stopped after adding {} tracks: {}", added, e),
            _ => error!("{}", e),
        },
    }
}

pub async fn augment(artist: &str, playlist_id: &str, token: &str) {
    let app = build_app();
    let credential = login(&app, token).await;

    info!("Adding missing tracks of {} to {}", artist, playlist_id);
    match app
        .orchestrator
        .augment_playlist(artist, playlist_id, &credential)
        .await
    {
        Ok(outcome) if outcome.added_count == 0 => {
            success!("Nothing to add, the playlist is complete.")
        }
        Ok(outcome) => success!("Added {} tracks", outcome.added_count),
        Err(e) => match (e.added_before_failure(), e.playlist_id()) {
            (Some(added), Some(playlist_id)) => error!(
                "Stopped after adding {} tracks to playlist {}: {}\nRun `augment --playlist {}` to add the rest.",
                added,
                playlist_id,
                e,
                playlist_id
            ),
            (Some(added), None) => error!("Stopped after adding {} tracks: {}", added, e),
            _ => error!("{}", e),
        },
    }
}

pub async fn playlists(token: &str, search: Option<String>) {
    let app = build_app();
    let credential = login(&app, token).await;

    let pb = spinner("Fetching playlists...");
    let result = app.client.user_playlists(&credential.access_token).await;
    pb.finish_and_clear();

    let mut playlists = match result {
        Ok(playlists) => playlists,
        Err(e) => error!("Failed to fetch playlists: {}", e),
    };

    if let Some(search) = search {
        let search_term = search.to_lowercase();
        playlists.retain(|p| p.name.to_lowercase().contains(&search_term));
    }
    if playlists.is_empty() {
        warning!("No playlists found.");
        return;
    }

    playlists.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
    let rows: Vec<PlaylistTableRow> = playlists
        .into_iter()
        .map(|p| PlaylistTableRow {
            id: p.id,
            name: p.name,
            owner: p.owner.display_name.unwrap_or(p.owner.id),
            tracks: p.tracks.map(|t| t.total).unwrap_or(0),
        })
        .collect();

    println!("{}", Table::new(rows));
}
