use crate::{cli::build_app, error, success, utils};

pub async fn clear_cache(artist: &str) {
    let artist_id = match utils::parse_artist_id(artist) {
        Ok(id) => id,
        Err(e) => error!("{}", e),
    };

    let app = build_app();
    match app.orchestrator.cache().invalidate(&artist_id).await {
        Ok(()) => success!("Cache cleared for artist {}", artist_id),
        Err(e) => error!("Failed to clear cache: {}", e),
    }
}
