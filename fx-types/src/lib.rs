//! # FX Types
//!
//! Domain types and port traits for the FX rate proxy.
//! This crate has ZERO external IO dependencies - only data structures,
//! rate lookup rules, and trait definitions.
//!
//! ## Architecture
//!
//! - `domain/` - Currency codes and immutable rate snapshots
//! - `ports/` - Trait definitions that upstream adapters implement
//! - `dto/` - Upstream wire payload and HTTP response shapes
//! - `error/` - Upstream and application error types

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use domain::{CurrencyCode, RateSnapshot, Rates};
pub use dto::{HealthResponse, OpenExchangeLatest};
pub use error::{AppError, UpstreamError};
pub use ports::RateProvider;
