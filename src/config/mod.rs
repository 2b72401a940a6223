//! Configuration loading and management
//!
//! ```yaml
//! api:
//!   base_url: https://api.example-gifts.com/v1
//!   products_path: products
//! cache:
//!   key: giftshop.products
//!   ttl_seconds: 3600
//!   path: /var/cache/giftshop/catalog.json
//! server:
//!   bind: 0.0.0.0:3000
//! pagination:
//!   default_limit: 24
//! ```

use crate::core::error::ConfigError;
use crate::core::pagination::MAX_PAGE_LIMIT;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable that overrides `api.token`
pub const TOKEN_ENV_VAR: &str = "GIFTSHOP_API_TOKEN";

/// Remote catalog API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the REST backend (e.g., "https://api.example.com/v1")
    pub base_url: String,

    /// Path of the product listing, relative to `base_url`
    pub products_path: String,

    /// Opaque bearer token, if the listing requires one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// Request timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            products_path: "products".to_string(),
            token: None,
            timeout_seconds: 10,
        }
    }
}

impl ApiConfig {
    /// Full URL of the product listing
    pub fn products_url(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.products_path.trim_start_matches('/')
        )
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

/// Local catalog cache settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Key the product list is stored under
    pub key: String,

    /// How long a cached list stays fresh
    pub ttl_seconds: u64,

    /// File backing the cache; in-memory only when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            key: "giftshop.products".to_string(),
            ttl_seconds: 3600,
            path: None,
        }
    }
}

impl CacheConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_seconds)
    }
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to listen on
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:3000".to_string(),
        }
    }
}

/// Pagination defaults for catalog listings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationConfig {
    /// Page size used when a request does not name one
    pub default_limit: usize,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self { default_limit: 20 }
    }
}

/// Complete configuration for the catalog service
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub api: ApiConfig,
    pub cache: CacheConfig,
    pub server: ServerConfig,
    pub pagination: PaginationConfig,
}

impl CatalogConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_string(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Apply environment overrides (currently only the API token)
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(token) = std::env::var(TOKEN_ENV_VAR)
            && !token.trim().is_empty()
        {
            self.api.token = Some(token.trim().to_string());
        }
        self
    }

    /// Reject values the rest of the crate cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api.base_url.trim().is_empty() {
            return Err(invalid("api.base_url", "must not be empty"));
        }
        if self.cache.key.trim().is_empty() {
            return Err(invalid("cache.key", "must not be empty"));
        }
        if self.cache.ttl_seconds == 0 {
            return Err(invalid("cache.ttl_seconds", "must be greater than zero"));
        }
        if self.pagination.default_limit == 0 || self.pagination.default_limit > MAX_PAGE_LIMIT {
            return Err(invalid(
                "pagination.default_limit",
                &format!("must be between 1 and {MAX_PAGE_LIMIT}"),
            ));
        }
        Ok(())
    }
}

fn invalid(field: &str, message: &str) -> ConfigError {
    ConfigError::Invalid {
        field: field.to_string(),
        message: message.to_string(),
    }
}
