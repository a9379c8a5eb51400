//! Rate Application Service
//!
//! Orchestrates cache lookup, upstream refresh and currency filtering.
//! Contains NO transport logic - the provider and cache are injected.

use std::sync::{Arc, Mutex, PoisonError};

use futures::FutureExt;
use futures::future::{BoxFuture, Shared};

use fx_types::{AppError, CurrencyCode, RateProvider, RateSnapshot, Rates, UpstreamError};

use crate::cache::RateCache;

type FetchResult = Result<RateSnapshot, UpstreamError>;
type InFlight = Shared<BoxFuture<'static, FetchResult>>;

/// Application service for rate lookups.
///
/// Generic over `P: RateProvider` - the upstream adapter is injected at compile time.
/// Concurrent cache misses share one upstream fetch; the fetch runs in its own
/// task, so a caller that goes away does not cancel it.
pub struct RateService<P: RateProvider> {
    provider: Arc<P>,
    cache: Arc<RateCache>,
    in_flight: Arc<Mutex<Option<InFlight>>>,
}

impl<P: RateProvider> RateService<P> {
    /// Creates a new rate service over the given provider and cache.
    pub fn new(provider: P, cache: Arc<RateCache>) -> Self {
        Self {
            provider: Arc::new(provider),
            cache,
            in_flight: Arc::new(Mutex::new(None)),
        }
    }

    /// Returns the cache backing this service.
    pub fn cache(&self) -> &Arc<RateCache> {
        &self.cache
    }

    /// Returns rates, optionally narrowed to a single currency.
    ///
    /// A blank filter returns the full table. A non-blank filter is matched
    /// case-insensitively; an unknown code or a zero rate is
    /// [`AppError::CurrencyNotFound`].
    pub async fn fetch_rates(&self, currency: Option<&str>) -> Result<Rates, AppError> {
        let snapshot = self.snapshot().await?;

        match currency.and_then(CurrencyCode::parse) {
            None => Ok(snapshot.rates().clone()),
            Some(code) => snapshot
                .select(&code)
                .ok_or_else(|| AppError::CurrencyNotFound(code.to_string())),
        }
    }

    /// Returns the cached snapshot, refreshing from upstream on a miss.
    ///
    /// An empty upstream table is returned as-is but never cached.
    pub async fn snapshot(&self) -> Result<RateSnapshot, UpstreamError> {
        if let Some(snapshot) = self.cache.get() {
            tracing::debug!("rates served from cache");
            return Ok(snapshot);
        }

        let flight = {
            let mut slot = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);

            // A fetch may have completed between the check above and taking the lock.
            if let Some(snapshot) = self.cache.get() {
                tracing::debug!("rates served from cache");
                return Ok(snapshot);
            }

            match slot.as_ref() {
                Some(flight) => {
                    tracing::debug!("joining in-flight rate fetch");
                    flight.clone()
                }
                None => {
                    let flight = self.start_fetch();
                    *slot = Some(flight.clone());
                    flight
                }
            }
        };

        flight.await
    }

    fn start_fetch(&self) -> InFlight {
        tracing::info!("fetching new rates");

        let provider = Arc::clone(&self.provider);
        let cache = Arc::clone(&self.cache);
        let in_flight = Arc::clone(&self.in_flight);

        let task = tokio::spawn(async move {
            let result = provider.fetch_latest().await;
            match &result {
                Ok(snapshot) if snapshot.is_empty() => {
                    tracing::warn!("upstream returned no rates, not caching");
                }
                Ok(snapshot) => {
                    cache.put(snapshot.clone());
                    tracing::info!(
                        count = snapshot.len(),
                        base = snapshot.base().unwrap_or("unknown"),
                        fetched_at = %snapshot.fetched_at(),
                        ttl = ?cache.ttl(),
                        "cached new rates"
                    );
                }
                Err(e) => {
                    tracing::warn!(error = %e, "upstream rate fetch failed");
                }
            }
            // Cleared after the cache write so later callers hit the cache.
            in_flight
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .take();
            result
        });

        let in_flight = Arc::clone(&self.in_flight);
        task.map(move |joined| {
            joined.unwrap_or_else(|e| {
                // The task never reached its own cleanup.
                in_flight
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .take();
                Err(UpstreamError::Unavailable(format!(
                    "rate fetch task failed: {e}"
                )))
            })
        })
        .boxed()
        .shared()
    }
}
