//! # Giftshop Catalog
//!
//! Catalog core for a gifting storefront: product decoding, client-side
//! filtering and faceting, cached retrieval from the REST backend, and a
//! small HTTP exposure of the filtered catalog.
//!
//! ## Features
//!
//! - **Total Filter Engine**: search, price range, flags, brand/supplier
//!   selection and ordering, never failing on malformed product data
//! - **Explicit Recompute**: setters mark state dirty, `recompute()` publishes
//!   at most once per change
//! - **Derived Facets**: distinct brands and suppliers from the unfiltered list
//! - **Injectable TTL Cache**: in-memory or file-backed, with a pluggable clock
//! - **REST Exposure**: `/products` with filter and page parameters, `/facets`
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use giftshop::prelude::*;
//!
//! let products = source.fetch_products().await?;
//! let mut engine = CatalogFilterEngine::with_sink(products, |view: &[Product]| {
//!     println!("{} products visible", view.len());
//! });
//!
//! engine.set_search_term("candle");
//! engine.set_show_on_sale(true);
//! engine.recompute();
//!
//! engine.clear_all();
//! engine.recompute();
//! ```

pub mod config;
pub mod core;
pub mod server;
pub mod source;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        BroadcastSink, CatalogFilterEngine, EntityId, EntityRef, Facet, Facets, FilterSink,
        FilterState, PageRequest, Paginated, PriceRange, Product, apply_filters, paginate,
        price_bounds,
    };

    // === Errors ===
    pub use crate::core::error::{
        CacheError, CatalogError, CatalogResult, ConfigError, FetchError, RequestError,
    };

    // === Sources & Storage ===
    #[cfg(feature = "http")]
    pub use crate::source::HttpCatalogSource;
    pub use crate::source::{CachedSource, CatalogSource, StaticSource};
    pub use crate::storage::{
        CacheEntry, CatalogCache, Clock, FileCache, InMemoryCache, SystemClock, TtlPolicy,
    };

    // === Config ===
    pub use crate::config::CatalogConfig;

    // === Server ===
    pub use crate::server::{CatalogHost, RestExposure, ServerBuilder};

    // === External dependencies ===
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, Utc};
}
