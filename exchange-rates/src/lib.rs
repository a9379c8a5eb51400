//! Upstream exchange rate providers.
//!
//! Two adapters implement the [`RateProvider`] port:
//! - [`OpenExchangeClient`] - one bounded-timeout GET against an Open Exchange
//!   Rates compatible `latest.json` endpoint
//! - [`StaticRateProvider`] - a hardcoded USD-based table for development and
//!   offline testing
//!
//! # Example
//! ```no_run
//! use exchange_rates::OpenExchangeClient;
//! use fx_types::RateProvider;
//!
//! # async fn run() -> Result<(), fx_types::UpstreamError> {
//! let client = OpenExchangeClient::new("https://openexchangerates.org/api/latest.json", "my-app-id");
//! let snapshot = client.fetch_latest().await?;
//! println!("{} rates", snapshot.len());
//! # Ok(())
//! # }
//! ```

mod open_exchange;
mod static_rates;

pub use fx_types::RateProvider;
pub use open_exchange::{DEFAULT_TIMEOUT, OPEN_EXCHANGE_LATEST_URL, OpenExchangeClient};
pub use static_rates::StaticRateProvider;
