//! HTTP client wrapper for the Glimmr device API.
//!
//! A single `DeviceHttp` is constructed at startup and handed to every
//! component that talks to devices; clones share the pooled transport and
//! are safe for concurrent use.

use std::time::Duration;

use reqwest::Client;
use tracing::debug;

use crate::error::{CoreError, QueryError};

/// Path prefix of the Glimmr HTTP API on every device.
pub const API_PATH: &str = "/api/DreamData";

/// Fixed per-request timeout. There is no retry; callers decide whether to
/// try again on the next scheduled refresh.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Shared HTTP client for device status/command queries.
#[derive(Debug, Clone)]
pub struct DeviceHttp {
    client: Client,
}

impl DeviceHttp {
    /// Create a client with the fixed request timeout.
    pub fn new() -> Result<Self, CoreError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| CoreError::Other(format!("HTTP client error: {}", e)))?;
        Ok(Self { client })
    }

    /// Issue a GET against `<base_url>/api/DreamData<path>` (path may be
    /// empty) and return the raw body for the caller to parse.
    pub async fn query(&self, base_url: &str, path: &str) -> Result<String, QueryError> {
        let url = format!("{}{}{}", base_url, API_PATH, path);
        debug!(%url, "device API call");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| QueryError::Connection(e.to_string()))?;

        if !response.status().is_success() {
            return Err(QueryError::NotADevice);
        }

        response
            .text()
            .await
            .map_err(|e| QueryError::Connection(e.to_string()))
    }
}
