use std::{
    collections::HashMap,
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
    time::Duration,
};

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use tokio::sync::RwLock;

use crate::{
    errors::{Result, SyncError},
    management::{Clock, SystemClock},
};

/// Key-value storage with a per-key time-to-live.
///
/// Values are opaque bytes; callers serialize themselves. Implementations
/// must be safe to share between concurrent requests.
#[async_trait]
pub trait CacheStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<()>;

    async fn delete(&self, key: &str) -> Result<()>;
}

/// Latest expiry that still round-trips through an RFC 3339 header.
fn latest_expiry() -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(9999, 12, 31)
        .and_then(|date| date.and_hms_opt(23, 59, 59))
        .map(|at| at.and_utc())
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

fn expiry(now: DateTime<Utc>, ttl: Duration) -> DateTime<Utc> {
    let ttl = TimeDelta::from_std(ttl).unwrap_or(TimeDelta::MAX);
    now.checked_add_signed(ttl)
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
        .min(latest_expiry())
}

/// Process-local store. Expired keys are dropped on read.
pub struct MemoryStore {
    entries: RwLock<HashMap<String, (Vec<u8>, DateTime<Utc>)>>,
    clock: Arc<dyn Clock>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            clock,
        }
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let now = self.clock.now();
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                Some((value, expires_at)) if *expires_at > now => return Ok(Some(value.clone())),
                Some(_) => {}
                None => return Ok(None),
            }
        }

        let mut entries = self.entries.write().await;
        if matches!(entries.get(key), Some((_, expires_at)) if *expires_at <= now) {
            entries.remove(key);
        }
        Ok(None)
    }

    async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<()> {
        let expires_at = expiry(self.clock.now(), ttl);
        self.entries
            .write()
            .await
            .insert(key.to_string(), (value, expires_at));
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}

/// One file per key under a cache directory.
///
/// The first line of a file is the RFC 3339 expiry time, the rest is the
/// value. Writes go to a temporary file that is renamed into place, so a
/// concurrent reader sees either the old or the new value. Reads never
/// delete; an expired file is a miss until it is overwritten or deleted.
pub struct FileStore {
    root: PathBuf,
    clock: Arc<dyn Clock>,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_clock(root, Arc::new(SystemClock))
    }

    pub fn with_clock(root: impl Into<PathBuf>, clock: Arc<dyn Clock>) -> Self {
        Self {
            root: root.into(),
            clock,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn get_path(&self, key: &str) -> PathBuf {
        let file_name: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
            .collect();
        self.root.join(format!("{}.cache", file_name))
    }
}

static TMP_COUNTER: AtomicU64 = AtomicU64::new(0);

fn io_error(path: &Path, e: std::io::Error) -> SyncError {
    SyncError::Cache(format!("{}: {}", path.display(), e))
}

#[async_trait]
impl CacheStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.get_path(key);
        let content = match async_fs::read(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(io_error(&path, e)),
        };

        let Some(split) = content.iter().position(|b| *b == b'\n') else {
            return Err(SyncError::Cache(format!(
                "{}: missing expiry header",
                path.display()
            )));
        };
        let header = String::from_utf8_lossy(&content[..split]);
        let expires_at = DateTime::parse_from_rfc3339(header.trim())
            .map_err(|e| SyncError::Cache(format!("{}: {}", path.display(), e)))?
            .with_timezone(&Utc);

        // Expired files stay until the next `set` replaces them.
        if expires_at <= self.clock.now() {
            return Ok(None);
        }

        Ok(Some(content[split + 1..].to_vec()))
    }

    async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<()> {
        async_fs::create_dir_all(&self.root)
            .await
            .map_err(|e| io_error(&self.root, e))?;

        let path = self.get_path(key);
        let tmp_path = path.with_extension(format!(
            "tmp-{}-{}",
            std::process::id(),
            TMP_COUNTER.fetch_add(1, Ordering::Relaxed)
        ));

        let mut content = format!("{}\n", expiry(self.clock.now(), ttl).to_rfc3339()).into_bytes();
        content.extend_from_slice(&value);

        async_fs::write(&tmp_path, content)
            .await
            .map_err(|e| io_error(&tmp_path, e))?;
        async_fs::rename(&tmp_path, &path)
            .await
            .map_err(|e| io_error(&path, e))
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let path = self.get_path(key);
        match async_fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_error(&path, e)),
        }
    }
}
