use crate::{cli::build_app, error, info, server::start_api_server};

pub async fn serve() {
    let app = build_app();
    info!(
        "Starting sync server (cache: {:?}, ttl: {}s)",
        app.settings.cache_backend,
        app.settings.cache_ttl.as_secs()
    );

    if let Err(e) = start_api_server(app).await {
        error!("{}", e);
    }
}
