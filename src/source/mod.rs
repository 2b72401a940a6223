//! Where product lists come from
//!
//! A [`CatalogSource`] produces the full product list for the storefront.
//! Sources compose: [`CachedSource`] wraps any other source with a TTL
//! cache, and [`HttpCatalogSource`] talks to the remote REST backend.

pub mod cached;
#[cfg(feature = "http")]
pub mod http;

pub use cached::CachedSource;
#[cfg(feature = "http")]
pub use http::HttpCatalogSource;

use crate::core::error::CatalogResult;
use crate::core::product::Product;
use async_trait::async_trait;
use std::sync::Arc;

/// Provider of the complete product list
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetch every product in the catalog
    async fn fetch_products(&self) -> CatalogResult<Vec<Product>>;
}

#[async_trait]
impl<S: CatalogSource + ?Sized> CatalogSource for Arc<S> {
    async fn fetch_products(&self) -> CatalogResult<Vec<Product>> {
        (**self).fetch_products().await
    }
}

/// Source serving a fixed product list
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    products: Arc<[Product]>,
}

impl StaticSource {
    pub fn new(products: impl Into<Arc<[Product]>>) -> Self {
        Self {
            products: products.into(),
        }
    }
}

#[async_trait]
impl CatalogSource for StaticSource {
    async fn fetch_products(&self) -> CatalogResult<Vec<Product>> {
        Ok(self.products.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_source() {
        let source = StaticSource::new(vec![Product::new(1, "Mug", 12.0)]);
        let products = source.fetch_products().await.unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].name, "Mug");
    }

    #[tokio::test]
    async fn test_shared_source() {
        let source: Arc<dyn CatalogSource> = Arc::new(StaticSource::default());
        assert!(source.fetch_products().await.unwrap().is_empty());
    }
}
