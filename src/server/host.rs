//! Server host for transport-agnostic catalog exposure
//!
//! The host holds everything a request handler needs: the catalog source and
//! the configuration. It does not know about HTTP.

use crate::config::CatalogConfig;
use crate::source::CatalogSource;
use std::sync::Arc;

#[cfg(feature = "http")]
use crate::core::error::CatalogResult;

/// Host context containing all catalog state
///
/// # Example
///
/// ```rust,ignore
/// let host = Arc::new(CatalogHost::from_config(config)?);
/// let app = RestExposure::build_router(host, vec![]);
/// ```
pub struct CatalogHost {
    /// Loaded configuration
    pub config: Arc<CatalogConfig>,

    /// Where product lists come from (usually cached)
    pub source: Arc<dyn CatalogSource>,
}

impl CatalogHost {
    pub fn new(source: Arc<dyn CatalogSource>, config: CatalogConfig) -> Self {
        Self {
            config: Arc::new(config),
            source,
        }
    }

    /// Build the standard source stack from configuration: the REST backend
    /// behind a TTL cache, file-backed when `cache.path` is set
    #[cfg(feature = "http")]
    pub fn from_config(config: CatalogConfig) -> CatalogResult<Self> {
        use crate::source::{CachedSource, HttpCatalogSource};
        use crate::storage::{CatalogCache, FileCache, InMemoryCache, TtlPolicy};

        config.validate()?;

        let http = HttpCatalogSource::new(&config.api)?;
        let cache: Arc<dyn CatalogCache> = match &config.cache.path {
            Some(path) => Arc::new(FileCache::new(path)),
            None => Arc::new(InMemoryCache::new()),
        };

        tracing::info!(
            url = http.url(),
            cache_key = %config.cache.key,
            ttl_seconds = config.cache.ttl_seconds,
            persistent = config.cache.path.is_some(),
            "Catalog source configured"
        );

        let source = CachedSource::new(
            http,
            cache,
            config.cache.key.clone(),
            TtlPolicy::new(config.cache.ttl()),
        );

        Ok(Self::new(Arc::new(source), config))
    }

    /// Page size used when a request does not ask for one
    pub fn default_page_limit(&self) -> usize {
        self.config.pagination.default_limit
    }
}
