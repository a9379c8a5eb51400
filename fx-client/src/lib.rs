//! # FX Client SDK
//!
//! A typed Rust client for the FX rate proxy API.

use fx_types::{CurrencyCode, HealthResponse, Rates};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

/// Error type for client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid currency code: {0:?}")]
    InvalidCurrency(String),
}

/// FX rate proxy client.
pub struct FxClient {
    base_url: String,
    http: Client,
}

impl FxClient {
    /// Creates a new client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    /// Checks if the API is healthy.
    pub async fn health(&self) -> Result<bool, ClientError> {
        let resp = self
            .http
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;
        if !resp.status().is_success() {
            return Ok(false);
        }
        let body: HealthResponse = Self::handle_response(resp).await?;
        Ok(body.status == "healthy")
    }

    /// Fetches every current rate.
    pub async fn current_rates(&self) -> Result<Rates, ClientError> {
        let resp = self
            .http
            .get(format!("{}/current_rates", self.base_url))
            .send()
            .await?;
        Self::handle_response(resp).await
    }

    /// Fetches a single rate. `Ok(None)` when the proxy does not know the currency.
    pub async fn rate(&self, currency: &str) -> Result<Option<f64>, ClientError> {
        let code = CurrencyCode::parse(currency)
            .ok_or_else(|| ClientError::InvalidCurrency(currency.to_string()))?;

        let resp = self
            .http
            .get(format!("{}/current_rates", self.base_url))
            .query(&[("currency", code.as_str())])
            .send()
            .await?;

        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let rates: Rates = Self::handle_response(resp).await?;
        Ok(rates.get(code.as_str()).copied())
    }

    async fn handle_response<T: DeserializeOwned>(
        resp: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            Ok(serde_json::from_str(&body)?)
        } else {
            let message = resp.text().await.unwrap_or_default().trim().to_string();
            Err(ClientError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }
}
