use chrono::{DateTime, Utc};
use common::errors::AppError;
use serde::{Serialize, de::DeserializeOwned};
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::fs;
use tracing::{debug, warn};

static TMP_SEQ: AtomicU64 = AtomicU64::new(0);

/// A decoded cache document and the time its file was last written.
#[derive(Debug, Clone, PartialEq)]
pub struct CachedDocument<T> {
    pub data: T,
    pub last_modified: DateTime<Utc>,
}

/// JSON documents stored by name in a single directory.
///
/// The directory is created on first access. Nothing is held in memory, so
/// every read sees whatever the last writer left on disk.
#[derive(Debug, Clone)]
pub struct CacheStore {
    dir: PathBuf,
}

impl CacheStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    async fn ensure_dir(&self) -> Result<(), AppError> {
        fs::create_dir_all(&self.dir).await.map_err(|e| {
            AppError::cache(format!(
                "Failed to create cache directory {}: {}",
                self.dir.display(),
                e
            ))
        })
    }

    /// Read and decode `name`.
    ///
    /// Returns `Ok(None)` when the file is missing, unreadable or does not
    /// decode as `T`. Only failing to create the cache directory is an error.
    pub async fn read<T: DeserializeOwned>(
        &self,
        name: &str,
    ) -> Result<Option<CachedDocument<T>>, AppError> {
        self.ensure_dir().await?;
        let path = self.path(name);

        let bytes = match fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "No cached document");
                return Ok(None);
            }
        };

        let last_modified = match fs::metadata(&path).await.and_then(|m| m.modified()) {
            Ok(modified) => DateTime::<Utc>::from(modified),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Cached document has no modification time");
                return Ok(None);
            }
        };

        match serde_json::from_slice::<T>(&bytes) {
            Ok(data) => Ok(Some(CachedDocument {
                data,
                last_modified,
            })),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Ignoring undecodable cached document");
                Ok(None)
            }
        }
    }

    /// Serialize `data` with two-space indentation and replace `name` with it.
    ///
    /// The document is written to a sibling temp file and renamed over `name`,
    /// so readers see either the previous document or the new one in full.
    pub async fn write<T: Serialize>(&self, name: &str, data: &T) -> Result<(), AppError> {
        self.ensure_dir().await?;
        let path = self.path(name);
        let tmp_path = self.tmp_path(name);

        let json = serde_json::to_string_pretty(data)?;
        if let Err(e) = fs::write(&tmp_path, json).await {
            let _ = fs::remove_file(&tmp_path).await;
            return Err(AppError::cache(format!(
                "Failed to write {}: {}",
                tmp_path.display(),
                e
            )));
        }

        if let Err(e) = fs::rename(&tmp_path, &path).await {
            let _ = fs::remove_file(&tmp_path).await;
            return Err(AppError::cache(format!(
                "Failed to replace {}: {}",
                path.display(),
                e
            )));
        }

        debug!(path = %path.display(), "Cached document written");
        Ok(())
    }

    // Unique per write so concurrent writers never share a temp file.
    fn tmp_path(&self, name: &str) -> PathBuf {
        let seq = TMP_SEQ.fetch_add(1, Ordering::Relaxed);
        self.dir.join(format!(".{}.{}.{}.tmp", name, std::process::id(), seq))
    }
}
