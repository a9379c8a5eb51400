//! Immutable rate snapshots.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::currency::CurrencyCode;

/// Mapping from currency code to rate, ordered by code.
pub type Rates = BTreeMap<String, f64>;

/// One complete set of rates as returned by a single upstream fetch.
///
/// The rate table is shared behind an `Arc`; cloning a snapshot never copies
/// the table and there is no way to mutate it after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct RateSnapshot {
    rates: Arc<Rates>,
    base: Option<String>,
    published_at: Option<DateTime<Utc>>,
    fetched_at: DateTime<Utc>,
}

impl RateSnapshot {
    /// Creates a snapshot stamped with the current time.
    pub fn new(rates: Rates) -> Self {
        Self {
            rates: Arc::new(rates),
            base: None,
            published_at: None,
            fetched_at: Utc::now(),
        }
    }

    /// Records the base currency reported by the provider.
    pub fn with_base(mut self, base: impl Into<String>) -> Self {
        self.base = Some(base.into());
        self
    }

    /// Records the provider's publication time.
    pub fn with_published_at(mut self, published_at: DateTime<Utc>) -> Self {
        self.published_at = Some(published_at);
        self
    }

    pub fn rates(&self) -> &Rates {
        &self.rates
    }

    pub fn base(&self) -> Option<&str> {
        self.base.as_deref()
    }

    pub fn published_at(&self) -> Option<DateTime<Utc>> {
        self.published_at
    }

    pub fn fetched_at(&self) -> DateTime<Utc> {
        self.fetched_at
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    /// Looks up a single rate. A literal zero rate counts as absent.
    pub fn rate(&self, code: &CurrencyCode) -> Option<f64> {
        self.rates
            .get(code.as_str())
            .copied()
            .filter(|rate| *rate != 0.0)
    }

    /// Returns `{code: rate}` for a known, non-zero rate.
    pub fn select(&self, code: &CurrencyCode) -> Option<Rates> {
        self.rate(code)
            .map(|rate| Rates::from([(code.to_string(), rate)]))
    }

    /// Returns whether two snapshots share the same rate table allocation.
    pub fn same_table(&self, other: &RateSnapshot) -> bool {
        Arc::ptr_eq(&self.rates, &other.rates)
    }
}

impl From<Rates> for RateSnapshot {
    fn from(rates: Rates) -> Self {
        Self::new(rates)
    }
}
