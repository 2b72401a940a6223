//! Typed errors for catalog retrieval and exposure
//!
//! The filter engine itself has no error type: it is total over any product
//! list and filter state. Errors only arise around it, when fetching or
//! caching the catalog, loading configuration, or parsing request input.
//!
//! # Error Categories
//!
//! - [`FetchError`]: the remote catalog could not be retrieved or decoded
//! - [`CacheError`]: the local catalog cache could not be read or written
//! - [`ConfigError`]: configuration could not be loaded or is invalid
//! - [`RequestError`]: a client sent unusable query parameters
//!
//! # Example
//!
//! ```rust,ignore
//! match source.fetch_products().await {
//!     Ok(products) => engine.set_products(products),
//!     Err(CatalogError::Fetch(FetchError::Status { status, .. })) if status == 401 => {
//!         prompt_login();
//!     }
//!     Err(e) => show_error_banner(&e.to_string()),
//! }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

/// The main error type for the catalog crate
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Remote catalog retrieval errors
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Local cache errors
    #[error(transparent)]
    Cache(#[from] CacheError),

    /// Configuration errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Invalid request input
    #[error(transparent)]
    Request(#[from] RequestError),

    /// Internal errors (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl CatalogError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            CatalogError::Fetch(e) => e.status_code(),
            CatalogError::Cache(_) => StatusCode::INTERNAL_SERVER_ERROR,
            CatalogError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            CatalogError::Request(_) => StatusCode::BAD_REQUEST,
            CatalogError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            CatalogError::Fetch(e) => e.error_code(),
            CatalogError::Cache(_) => "CACHE_ERROR",
            CatalogError::Config(_) => "CONFIG_ERROR",
            CatalogError::Request(e) => e.error_code(),
            CatalogError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            CatalogError::Fetch(FetchError::Status { url, status }) => Some(serde_json::json!({
                "url": url,
                "upstream_status": status
            })),
            CatalogError::Request(RequestError::InvalidParameter { name, value, .. }) => {
                Some(serde_json::json!({
                    "parameter": name,
                    "value": value
                }))
            }
            _ => None,
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.error_code(), error = %self, "Request failed");
        }
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

// =============================================================================
// Fetch Errors
// =============================================================================

/// Errors retrieving the catalog from the remote API
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request never produced a response (DNS, TLS, timeout, ...)
    #[error("Failed to reach catalog API at {url}: {message}")]
    Transport { url: String, message: String },

    /// The API answered with a non-success status
    #[error("Catalog API at {url} returned status {status}")]
    Status { url: String, status: u16 },

    /// The body was not a product list
    #[error("Failed to decode catalog response: {message}")]
    Decode { message: String },
}

impl FetchError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            FetchError::Transport { .. } => StatusCode::BAD_GATEWAY,
            FetchError::Status { .. } => StatusCode::BAD_GATEWAY,
            FetchError::Decode { .. } => StatusCode::BAD_GATEWAY,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            FetchError::Transport { .. } => "CATALOG_UNREACHABLE",
            FetchError::Status { .. } => "CATALOG_UPSTREAM_STATUS",
            FetchError::Decode { .. } => "CATALOG_DECODE_ERROR",
        }
    }
}

// =============================================================================
// Cache Errors
// =============================================================================

/// Errors reading or writing the local catalog cache
#[derive(Debug, Error)]
pub enum CacheError {
    /// Reading or writing the backing store failed
    #[error("Cache I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored data could not be (de)serialized
    #[error("Cache serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A lock guarding the cache was poisoned
    #[error("Cache lock poisoned: {0}")]
    Lock(String),
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read
    #[error("Failed to read config file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The file was read but is not valid YAML for the config schema
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// A field holds an unusable value
    #[error("Invalid config field '{field}': {message}")]
    Invalid { field: String, message: String },
}

// =============================================================================
// Request Errors
// =============================================================================

/// Errors in client-supplied request input
#[derive(Debug, Error)]
pub enum RequestError {
    /// A query parameter could not be interpreted
    #[error("Invalid value '{value}' for parameter '{name}': {message}")]
    InvalidParameter {
        name: String,
        value: String,
        message: String,
    },
}

impl RequestError {
    pub fn invalid(name: &str, value: &str, message: impl Into<String>) -> Self {
        RequestError::InvalidParameter {
            name: name.to_string(),
            value: value.to_string(),
            message: message.into(),
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            RequestError::InvalidParameter { .. } => "INVALID_PARAMETER",
        }
    }
}

/// Result alias for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_status_maps_to_bad_gateway() {
        let err = CatalogError::from(FetchError::Status {
            url: "https://api.example.com/products".to_string(),
            status: 503,
        });
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(err.error_code(), "CATALOG_UPSTREAM_STATUS");

        let response = err.to_response();
        assert_eq!(response.details.unwrap()["upstream_status"], 503);
    }

    #[test]
    fn test_request_error_is_bad_request() {
        let err = CatalogError::from(RequestError::invalid("min_price", "cheap", "not a number"));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            err.to_string(),
            "Invalid value 'cheap' for parameter 'min_price': not a number"
        );
        assert_eq!(err.to_response().details.unwrap()["parameter"], "min_price");
    }

    #[test]
    fn test_cache_error_from_io() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = CatalogError::from(CacheError::from(io));
        assert_eq!(err.error_code(), "CACHE_ERROR");
        assert!(err.to_response().details.is_none());
    }

    #[test]
    fn test_into_response_status() {
        let response = CatalogError::Internal("boom".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
