//! File-backed catalog cache
//!
//! All keys live in a single JSON document, so the cache survives restarts
//! the way browser local storage survives page reloads. Writes go to a
//! sibling temporary file that is then renamed over the original.

use super::{CacheEntry, CatalogCache};
use crate::core::error::CacheError;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

type Document = BTreeMap<String, CacheEntry>;

pub struct FileCache {
    path: PathBuf,
    /// Serializes read-modify-write cycles within this process
    guard: Mutex<()>,
}

impl FileCache {
    /// The file is created on first write; a missing file reads as empty
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            guard: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Document, CacheError> {
        match std::fs::read(&self.path) {
            Ok(bytes) if bytes.is_empty() => Ok(Document::new()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Document::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn store(&self, document: &Document) -> Result<(), CacheError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, serde_json::to_vec(document)?)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, ()>, CacheError> {
        self.guard
            .lock()
            .map_err(|e| CacheError::Lock(format!("Failed to acquire file lock: {}", e)))
    }
}

impl CatalogCache for FileCache {
    fn get(&self, key: &str) -> Result<Option<CacheEntry>, CacheError> {
        let _guard = self.lock()?;
        Ok(self.load()?.remove(key))
    }

    fn set(
        &self,
        key: &str,
        value: serde_json::Value,
        stored_at: DateTime<Utc>,
    ) -> Result<(), CacheError> {
        let _guard = self.lock()?;
        let mut document = self.load().unwrap_or_else(|e| {
            tracing::warn!(path = %self.path.display(), error = %e, "Discarding unreadable cache file");
            Document::new()
        });
        document.insert(key.to_string(), CacheEntry { value, stored_at });
        self.store(&document)
    }

    fn remove(&self, key: &str) -> Result<(), CacheError> {
        let _guard = self.lock()?;
        let mut document = self.load()?;
        if document.remove(key).is_some() {
            self.store(&document)?;
        }
        Ok(())
    }
}
