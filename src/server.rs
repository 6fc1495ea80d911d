use std::{net::SocketAddr, str::FromStr, time::Instant};

use axum::{
    Router,
    extract::Request,
    middleware::{self, Next},
    response::Response,
    routing::{delete, get, post},
};

use crate::{
    api,
    app::App,
    errors::{Result, SyncError},
    info, success,
};

pub fn router(app: App) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/login", post(api::login))
        .route("/playlists", get(api::playlists::list))
        .route("/playlist/create", post(api::playlists::create))
        .route("/playlist/modify", post(api::playlists::modify))
        .route("/cache/{artist_id}", delete(api::playlists::clear_cache))
        .layer(middleware::from_fn(log_request))
        .with_state(app)
}

async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(request).await;

    info!(
        "{} {} {} ({} ms)",
        method,
        path,
        response.status().as_u16(),
        started.elapsed().as_millis()
    );
    response
}

pub async fn start_api_server(app: App) -> Result<()> {
    let addr = SocketAddr::from_str(&app.settings.server_addr).map_err(|e| {
        SyncError::Config(format!(
            "Failed to parse server address {}: {}",
            app.settings.server_addr, e
        ))
    })?;

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| SyncError::Config(format!("Failed to bind {}: {}", addr, e)))?;
    success!("Listening on {}", addr);

    axum::serve(listener, router(app))
        .await
        .map_err(|e| SyncError::Config(format!("Server error: {}", e)))
}
