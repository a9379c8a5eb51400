//! Hardcoded rates for development and testing.

use async_trait::async_trait;

use fx_types::{RateProvider, RateSnapshot, Rates, UpstreamError};

/// Units of each currency per one USD.
const USD_RATES: &[(&str, f64)] = &[
    ("USD", 1.0),
    ("EUR", 0.92),
    ("GBP", 0.79),
    ("INR", 83.12),
];

/// Serves a fixed USD-based table without touching the network.
#[derive(Debug, Clone)]
pub struct StaticRateProvider {
    rates: Rates,
}

impl Default for StaticRateProvider {
    fn default() -> Self {
        Self::new(
            USD_RATES
                .iter()
                .map(|(code, rate)| (code.to_string(), *rate))
                .collect(),
        )
    }
}

impl StaticRateProvider {
    /// Serves `rates` instead of the built-in table.
    pub fn new(rates: Rates) -> Self {
        Self { rates }
    }
}

#[async_trait]
impl RateProvider for StaticRateProvider {
    async fn fetch_latest(&self) -> Result<RateSnapshot, UpstreamError> {
        Ok(RateSnapshot::new(self.rates.clone()).with_base("USD"))
    }
}
