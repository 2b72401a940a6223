//! In-memory catalog cache for testing and single-process deployments

use super::{CacheEntry, CatalogCache};
use crate::core::error::CacheError;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// In-memory cache implementation
///
/// Uses RwLock for thread-safe access. Clones share the same entries.
#[derive(Clone, Default)]
pub struct InMemoryCache {
    entries: Arc<RwLock<HashMap<String, CacheEntry>>>,
}

impl InMemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl CatalogCache for InMemoryCache {
    fn get(&self, key: &str) -> Result<Option<CacheEntry>, CacheError> {
        let entries = self
            .entries
            .read()
            .map_err(|e| CacheError::Lock(format!("Failed to acquire read lock: {}", e)))?;

        Ok(entries.get(key).cloned())
    }

    fn set(
        &self,
        key: &str,
        value: serde_json::Value,
        stored_at: DateTime<Utc>,
    ) -> Result<(), CacheError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| CacheError::Lock(format!("Failed to acquire write lock: {}", e)))?;

        entries.insert(key.to_string(), CacheEntry { value, stored_at });

        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), CacheError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| CacheError::Lock(format!("Failed to acquire write lock: {}", e)))?;

        entries.remove(key);

        Ok(())
    }
}
