//! Openverse HTTP client adapter
//!
//! Thin GET adapter over the Openverse REST API. The upstream response
//! shape is deliberately not validated; bodies come back as opaque
//! `serde_json::Value` structures for callers to pass through.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use crate::config::ApiConfig;

/// Errors from a single Openverse request
#[derive(Error, Debug)]
pub enum OpenverseError {
    /// Upstream answered with a non-success HTTP status
    #[error("{status} {reason}")]
    Upstream {
        /// HTTP status code
        status: u16,
        /// Canonical reason phrase for the status
        reason: String,
    },

    /// Network-level fault (DNS, timeout, connection reset)
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
}

/// Result type alias for adapter calls
pub type ApiResult<T> = Result<T, OpenverseError>;

/// Adapter contract the tools and the essay aggregator call through
///
/// Every Openverse endpoint is a GET with query parameters, so a single
/// method covers the whole surface. Implementations must not retry or
/// cache; each call maps to exactly one upstream request.
#[async_trait]
pub trait ImageApi: Send + Sync {
    /// GET `path` (relative to the API base) with the given query pairs
    /// and return the parsed JSON body.
    async fn get_json(&self, path: &str, params: &[(&str, String)]) -> ApiResult<Value>;
}

/// reqwest-backed Openverse client
pub struct OpenverseClient {
    client: Client,
    base_url: String,
}

impl OpenverseClient {
    pub fn new(config: &ApiConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(&config.user_agent)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl ImageApi for OpenverseClient {
    async fn get_json(&self, path: &str, params: &[(&str, String)]) -> ApiResult<Value> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, params = params.len(), "GET openverse");

        let response = self.client.get(&url).query(params).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(OpenverseError::Upstream {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        Ok(response.json().await?)
    }
}
