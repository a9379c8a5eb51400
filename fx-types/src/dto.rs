//! Data Transfer Objects (DTOs) for the upstream payload and HTTP responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{RateSnapshot, Rates};

// ─────────────────────────────────────────────────────────────────────────────
// Upstream DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Body of the provider's `latest.json` endpoint.
///
/// Only `rates` is required; the remaining fields are informational.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OpenExchangeLatest {
    #[serde(default)]
    pub disclaimer: Option<String>,
    #[serde(default)]
    pub license: Option<String>,
    /// Publication time as a Unix timestamp
    #[serde(default)]
    #[schema(example = 1_700_000_000)]
    pub timestamp: Option<i64>,
    #[serde(default)]
    #[schema(example = "USD")]
    pub base: Option<String>,
    #[schema(value_type = Object, example = json!({"AUD": 1.27, "SGD": 1.36, "EUR": 0.85}))]
    pub rates: Rates,
}

impl OpenExchangeLatest {
    fn published_at(&self) -> Option<DateTime<Utc>> {
        self.timestamp
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
    }
}

impl From<OpenExchangeLatest> for RateSnapshot {
    fn from(latest: OpenExchangeLatest) -> Self {
        let published_at = latest.published_at();
        let mut snapshot = RateSnapshot::new(latest.rates);
        if let Some(base) = latest.base {
            snapshot = snapshot.with_base(base);
        }
        if let Some(published_at) = published_at {
            snapshot = snapshot.with_published_at(published_at);
        }
        snapshot
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// HTTP DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Response of the health endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    #[schema(example = "healthy")]
    pub status: String,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".into(),
        }
    }
}
