//! TTL-cached catalog source

use super::CatalogSource;
use crate::core::error::CatalogResult;
use crate::core::product::Product;
use crate::storage::{CatalogCache, Clock, SystemClock, TtlPolicy};
use async_trait::async_trait;
use std::sync::Arc;

/// Wraps a source so repeated fetches within the TTL hit the cache
///
/// The cache is best-effort: read or write failures are logged and the inner
/// source is consulted instead, and an entry that no longer decodes is
/// evicted.
pub struct CachedSource<S> {
    inner: S,
    cache: Arc<dyn CatalogCache>,
    key: String,
    policy: TtlPolicy,
    clock: Arc<dyn Clock>,
}

impl<S: CatalogSource> CachedSource<S> {
    pub fn new(
        inner: S,
        cache: Arc<dyn CatalogCache>,
        key: impl Into<String>,
        policy: TtlPolicy,
    ) -> Self {
        Self {
            inner,
            cache,
            key: key.into(),
            policy,
            clock: Arc::new(SystemClock),
        }
    }

    /// Replace the clock used for freshness decisions
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Cached list if present, fresh and decodable
    fn cached(&self) -> Option<Vec<Product>> {
        let entry = match self.cache.get(&self.key) {
            Ok(Some(entry)) => entry,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "Catalog cache read failed");
                return None;
            }
        };

        if !self.policy.is_fresh(&entry, self.clock.now()) {
            tracing::debug!(key = %self.key, stored_at = %entry.stored_at, "Cached catalog expired");
            return None;
        }

        match serde_json::from_value::<Vec<Product>>(entry.value) {
            Ok(products) => Some(products),
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "Evicting undecodable cached catalog");
                if let Err(e) = self.cache.remove(&self.key) {
                    tracing::warn!(key = %self.key, error = %e, "Catalog cache eviction failed");
                }
                None
            }
        }
    }

    /// Fetch from the inner source and store the result, bypassing freshness
    pub async fn refresh(&self) -> CatalogResult<Vec<Product>> {
        let products = self.inner.fetch_products().await?;

        // Stored already coerced; reads decode through the same boundary
        match serde_json::to_value(&products) {
            Ok(value) => {
                if let Err(e) = self.cache.set(&self.key, value, self.clock.now()) {
                    tracing::warn!(key = %self.key, error = %e, "Catalog cache write failed");
                }
            }
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "Catalog not cacheable");
            }
        }

        Ok(products)
    }

    /// Drop the cached list so the next fetch goes to the inner source
    pub fn invalidate(&self) -> CatalogResult<()> {
        self.cache.remove(&self.key)?;
        Ok(())
    }
}

#[async_trait]
impl<S: CatalogSource> CatalogSource for CachedSource<S> {
    async fn fetch_products(&self) -> CatalogResult<Vec<Product>> {
        if let Some(products) = self.cached() {
            tracing::debug!(key = %self.key, count = products.len(), "Serving catalog from cache");
            return Ok(products);
        }

        self.refresh().await
    }
}
