//! HTTP client wrapper - the four dashboard GET calls

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde_json::Value;
use thiserror::Error;

use crate::models::EndpointKey;

/// Failure of a single endpoint fetch
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request could not complete at the network level
    #[error("{0}")]
    Transport(String),

    /// The server answered with a non-success status
    #[error("Request failed with status code {status}")]
    Http { status: u16 },
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        let msg = if e.is_timeout() {
            "Request timed out".to_string()
        } else if e.is_connect() {
            format!("Connection failed: {}", e)
        } else if e.is_body() || e.is_decode() {
            format!("Error reading body: {}", e)
        } else {
            format!("Network error: {}", e)
        };
        ApiError::Transport(msg)
    }
}

/// Client for the dashboard backend
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// `base_url` is absolute; a trailing slash is ignored
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        ApiClient {
            http: create_client(),
            base_url,
        }
    }

    /// Full URL for an endpoint
    pub fn url_for(&self, key: EndpointKey) -> String {
        format!("{}{}", self.base_url, key.path())
    }

    /// GET {base}/hello
    pub async fn get_hello(&self) -> Result<Value, ApiError> {
        self.get(EndpointKey::Hello).await
    }

    /// GET {base}/health
    pub async fn check_health(&self) -> Result<Value, ApiError> {
        self.get(EndpointKey::Health).await
    }

    /// GET {base}/data
    pub async fn fetch_data(&self) -> Result<Value, ApiError> {
        self.get(EndpointKey::Data).await
    }

    /// GET {base}/user
    pub async fn get_user(&self) -> Result<Value, ApiError> {
        self.get(EndpointKey::User).await
    }

    /// Run the operation serving `key`
    pub async fn fetch(&self, key: EndpointKey) -> Result<Value, ApiError> {
        match key {
            EndpointKey::Hello => self.get_hello().await,
            EndpointKey::Health => self.check_health().await,
            EndpointKey::Data => self.fetch_data().await,
            EndpointKey::User => self.get_user().await,
        }
    }

    async fn get(&self, key: EndpointKey) -> Result<Value, ApiError> {
        let url = self.url_for(key);
        let result = self.execute(&url).await;

        match &result {
            Ok(_) => tracing::debug!(endpoint = key.as_str(), %url, "GET succeeded"),
            Err(e) => tracing::warn!(endpoint = key.as_str(), %url, error = %e, "GET failed"),
        }
        result
    }

    async fn execute(&self, url: &str) -> Result<Value, ApiError> {
        let resp = self.http.get(url).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ApiError::Http {
                status: status.as_u16(),
            });
        }

        let body = resp.text().await?;
        Ok(parse_body(body))
    }
}

/// Decode a response body. Non-JSON text comes back as a JSON string.
fn parse_body(body: String) -> Value {
    if body.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str::<Value>(&body).unwrap_or(Value::String(body))
}

/// Create an HTTP client with default configuration
pub fn create_client() -> reqwest::Client {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    reqwest::Client::builder()
        .default_headers(headers)
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}
