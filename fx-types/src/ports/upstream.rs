//! Upstream rate provider port.
//!
//! Implementations can be HTTP clients, fixed tables, test doubles, etc.

use std::sync::Arc;

use crate::domain::RateSnapshot;
use crate::error::UpstreamError;

/// Port trait for upstream rate providers.
///
/// One call is one attempt: implementations do not retry and do not cache.
#[async_trait::async_trait]
pub trait RateProvider: Send + Sync + 'static {
    /// Fetches the latest complete rate table.
    async fn fetch_latest(&self) -> Result<RateSnapshot, UpstreamError>;
}

#[async_trait::async_trait]
impl<P: RateProvider + ?Sized> RateProvider for Arc<P> {
    async fn fetch_latest(&self) -> Result<RateSnapshot, UpstreamError> {
        (**self).fetch_latest().await
    }
}

#[async_trait::async_trait]
impl<P: RateProvider + ?Sized> RateProvider for Box<P> {
    async fn fetch_latest(&self) -> Result<RateSnapshot, UpstreamError> {
        (**self).fetch_latest().await
    }
}
