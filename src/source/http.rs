//! Catalog source backed by the storefront's REST API

use super::CatalogSource;
use crate::config::ApiConfig;
use crate::core::error::{CatalogError, CatalogResult, FetchError};
use crate::core::product::Product;
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use serde_json::Value;

/// Envelope keys the API has been seen to wrap product lists in
const ENVELOPE_KEYS: [&str; 3] = ["data", "products", "results"];

/// Fetches the product list with a single `GET`
#[derive(Debug, Clone)]
pub struct HttpCatalogSource {
    client: reqwest::Client,
    url: String,
    token: Option<String>,
}

impl HttpCatalogSource {
    pub fn new(config: &ApiConfig) -> CatalogResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| CatalogError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: config.products_url(),
            token: config.token.clone(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

/// Pull the product records out of a response body
///
/// Accepts a bare array or an object wrapping the array under one of the
/// envelope keys.
pub fn extract_records(body: Value) -> Result<Vec<Value>, FetchError> {
    match body {
        Value::Array(records) => Ok(records),
        Value::Object(mut object) => ENVELOPE_KEYS
            .iter()
            .find_map(|key| match object.remove(*key) {
                Some(Value::Array(records)) => Some(records),
                _ => None,
            })
            .ok_or_else(|| FetchError::Decode {
                message: "expected a product array or an object with a 'data' array".to_string(),
            }),
        other => Err(FetchError::Decode {
            message: format!("expected a product array, got {}", json_kind(&other)),
        }),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[async_trait]
impl CatalogSource for HttpCatalogSource {
    async fn fetch_products(&self) -> CatalogResult<Vec<Product>> {
        let mut request = self.client.get(&self.url).header(ACCEPT, "application/json");
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| FetchError::Transport {
            url: self.url.clone(),
            message: e.to_string(),
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: self.url.clone(),
                status: status.as_u16(),
            }
            .into());
        }

        let body: Value = response.json().await.map_err(|e| FetchError::Decode {
            message: e.to_string(),
        })?;

        let records = extract_records(body)?;
        let received = records.len();
        let products = Product::list_from_json(records);

        tracing::info!(
            url = %self.url,
            received,
            decoded = products.len(),
            "Fetched catalog"
        );

        Ok(products)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_bare_array() {
        let records = extract_records(json!([{"id": 1}, {"id": 2}])).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_extract_enveloped_array() {
        let records = extract_records(json!({"data": [{"id": 1}], "total": 1})).unwrap();
        assert_eq!(records.len(), 1);

        let records = extract_records(json!({"products": []})).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_extract_rejects_other_shapes() {
        assert!(matches!(
            extract_records(json!({"data": "nope"})),
            Err(FetchError::Decode { .. })
        ));
        let err = extract_records(json!("products")).unwrap_err();
        assert!(err.to_string().contains("a string"));
    }

    #[test]
    fn test_url_from_config() {
        let source = HttpCatalogSource::new(&ApiConfig {
            base_url: "https://api.example.com/".to_string(),
            ..ApiConfig::default()
        })
        .unwrap();
        assert_eq!(source.url(), "https://api.example.com/products");
    }
}
