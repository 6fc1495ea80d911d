use std::{sync::Arc, time::Duration};

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    errors::{Result, SyncError},
    info,
    management::{CacheStore, Clock, SystemClock},
    spotify::catalog::CatalogBuilder,
    types::ArtistCatalog,
    warning,
};

pub const CACHE_KEY_PREFIX: &str = "artist_tracks";

/// What gets stored per artist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    pub artist_id: String,
    pub stored_at: DateTime<Utc>,
    pub catalog: ArtistCatalog,
}

/// Artist catalogs kept for a fixed time-to-live in front of the builder.
///
/// Concurrent misses for the same artist both rebuild and both store; the
/// last write wins. A few minutes of staleness does not change the result
/// of a sync, so no per-key lock is taken.
pub struct CatalogCache {
    store: Arc<dyn CacheStore>,
    builder: CatalogBuilder,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl CatalogCache {
    pub fn new(store: Arc<dyn CacheStore>, builder: CatalogBuilder, ttl: Duration) -> Self {
        Self {
            store,
            builder,
            ttl,
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn cache_key(artist_id: &str) -> String {
        format!("{}:{}", CACHE_KEY_PREFIX, artist_id)
    }

    /// Returns the cached catalog of `artist_id`, building and storing it on
    /// a miss.
    ///
    /// Missing, expired and undecodable entries are all misses. A failed
    /// build is returned as is and leaves the cache untouched.
    pub async fn get_or_build(&self, artist_id: &str, token: &str) -> Result<ArtistCatalog> {
        if let Some(catalog) = self.lookup(artist_id).await {
            info!(
                "Cache hit for artist {} ({} tracks)",
                artist_id,
                catalog.len()
            );
            return Ok(catalog);
        }

        info!("Cache miss for artist {}, fetching tracks", artist_id);
        let build = self.builder.build_catalog(artist_id, token).await?;
        self.store(&build.catalog).await;
        Ok(build.catalog)
    }

    /// A live, decodable entry for `artist_id`, if there is one.
    pub async fn lookup(&self, artist_id: &str) -> Option<ArtistCatalog> {
        let key = Self::cache_key(artist_id);
        let bytes = match self.store.get(&key).await {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return None,
            Err(e) => {
                warning!("Cache read for {} failed, rebuilding: {}", key, e);
                return None;
            }
        };

        let entry = match decode_entry(&key, artist_id, &bytes) {
            Ok(entry) => entry,
            Err(e) => {
                warning!("{}, refetching", e);
                return None;
            }
        };

        if self.is_expired(&entry) {
            return None;
        }
        Some(entry.catalog)
    }

    /// Stores a freshly built catalog. Failures are logged, not returned.
    pub async fn store(&self, catalog: &ArtistCatalog) {
        let key = Self::cache_key(&catalog.artist_id);
        let entry = CacheEntry {
            artist_id: catalog.artist_id.clone(),
            stored_at: self.clock.now(),
            catalog: catalog.clone(),
        };

        let bytes = match serde_json::to_vec(&entry) {
            Ok(bytes) => bytes,
            Err(e) => {
                warning!("Could not serialize catalog for {}: {}", key, e);
                return;
            }
        };

        match self.store.set(&key, bytes, self.ttl).await {
            Ok(()) => info!("Saved {} tracks to cache for {}", catalog.len(), key),
            Err(e) => warning!("Could not save catalog for {}: {}", key, e),
        }
    }

    /// Drops the cached catalog of `artist_id`.
    pub async fn invalidate(&self, artist_id: &str) -> Result<()> {
        let key = Self::cache_key(artist_id);
        self.store.delete(&key).await?;
        info!("Cleared cache for artist {}", artist_id);
        Ok(())
    }

    fn is_expired(&self, entry: &CacheEntry) -> bool {
        let ttl = TimeDelta::from_std(self.ttl).unwrap_or(TimeDelta::MAX);
        let age = self.clock.now().signed_duration_since(entry.stored_at);
        age >= ttl
    }
}

fn decode_entry(key: &str, artist_id: &str, bytes: &[u8]) -> Result<CacheEntry> {
    let entry: CacheEntry = serde_json::from_slice(bytes).map_err(|e| SyncError::CacheCorrupt {
        key: key.to_string(),
        message: e.to_string(),
    })?;

    if entry.artist_id != artist_id || entry.catalog.artist_id != artist_id {
        return Err(SyncError::CacheCorrupt {
            key: key.to_string(),
            message: format!("entry belongs to artist {}", entry.artist_id),
        });
    }
    Ok(entry)
}
