//! Domain models for the rate proxy.

pub mod currency;
pub mod snapshot;

pub use currency::CurrencyCode;
pub use snapshot::{RateSnapshot, Rates};
