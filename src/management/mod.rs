mod cache;
mod store;

use chrono::{DateTime, Utc};

pub use cache::{CACHE_KEY_PREFIX, CacheEntry, CatalogCache};
pub use store::{CacheStore, FileStore, MemoryStore};

/// Source of the current time for expiry decisions.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
