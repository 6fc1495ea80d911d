use std::sync::Arc;

use crate::{
    config::{CacheBackend, Settings},
    errors::Result,
    management::{CacheStore, CatalogCache, FileStore, MemoryStore},
    spotify::{
        HttpTransport, SpotifyClient, Transport,
        catalog::CatalogBuilder,
        playlist::{BatchMutator, PlaylistDiffer},
    },
    sync::SyncOrchestrator,
};

/// Service handles shared by every request for the lifetime of the process.
#[derive(Clone)]
pub struct App {
    pub settings: Settings,
    pub http: reqwest::Client,
    pub client: SpotifyClient,
    pub orchestrator: Arc<SyncOrchestrator>,
}

impl App {
    /// Creates the HTTP client and cache store once and wires them into the
    /// sync components.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let transport = HttpTransport::new(settings.http_timeout)?;
        let http = transport.client().clone();

        let store: Arc<dyn CacheStore> = match settings.cache_backend {
            CacheBackend::Memory => Arc::new(MemoryStore::new()),
            CacheBackend::File => Arc::new(FileStore::new(settings.cache_dir.clone())),
        };

        Ok(Self::with_parts(settings, http, Arc::new(transport), store))
    }

    /// Wires the components around an existing transport and store.
    ///
    /// `http` is used for requests that bypass the transport, such as the
    /// token exchange, and should be the client the transport was built on.
    pub fn with_parts(
        settings: &Settings,
        http: reqwest::Client,
        transport: Arc<dyn Transport>,
        store: Arc<dyn CacheStore>,
    ) -> Self {
        let client = SpotifyClient::new(transport, settings.api_url.clone());
        let cache = CatalogCache::new(
            store,
            CatalogBuilder::new(client.clone()),
            settings.cache_ttl,
        );
        let orchestrator = SyncOrchestrator::new(
            client.clone(),
            cache,
            PlaylistDiffer::new(client.clone()),
            BatchMutator::with_chunk_size(client.clone(), settings.chunk_size),
        );

        Self {
            settings: settings.clone(),
            http,
            client,
            orchestrator: Arc::new(orchestrator),
        }
    }
}
