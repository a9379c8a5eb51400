//! Open Exchange Rates HTTP client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use fx_types::{OpenExchangeLatest, RateProvider, RateSnapshot, UpstreamError};

/// Public `latest.json` endpoint.
pub const OPEN_EXCHANGE_LATEST_URL: &str = "https://openexchangerates.org/api/latest.json";

/// Request timeout applied when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Fetches the latest rates with a single GET per call.
#[derive(Debug, Clone)]
pub struct OpenExchangeClient {
    base_url: String,
    app_id: String,
    timeout: Duration,
    http: Client,
}

impl OpenExchangeClient {
    /// Creates a client for `base_url`, authenticating with `app_id`.
    pub fn new(base_url: impl Into<String>, app_id: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            app_id: app_id.into(),
            timeout: DEFAULT_TIMEOUT,
            http: Client::new(),
        }
    }

    /// Overrides the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[async_trait]
impl RateProvider for OpenExchangeClient {
    async fn fetch_latest(&self) -> Result<RateSnapshot, UpstreamError> {
        let resp = self
            .http
            .get(&self.base_url)
            .query(&[("app_id", self.app_id.as_str())])
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| UpstreamError::Unavailable(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(UpstreamError::Status(status.as_u16()));
        }

        // Reading the body can still time out or drop mid-stream.
        let body = resp
            .bytes()
            .await
            .map_err(|e| UpstreamError::Unavailable(e.to_string()))?;

        let latest: OpenExchangeLatest = serde_json::from_slice(&body)
            .map_err(|e| UpstreamError::Malformed(e.to_string()))?;

        tracing::debug!(count = latest.rates.len(), "received upstream rates");
        Ok(latest.into())
    }
}
