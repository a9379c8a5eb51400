//! # FX Hex
//!
//! Application service layer and HTTP adapter for the FX rate proxy.
//!
//! ## Architecture
//!
//! - `cache` - Single-slot TTL cache for the latest rate snapshot
//! - `service` - Application service (cache-or-fetch with single-flight refresh)
//! - `inbound/` - HTTP adapter (Axum server)
//!
//! The service is generic over `P: RateProvider`, allowing
//! different upstream implementations to be injected.

pub mod cache;
pub mod inbound;
mod openapi;
pub mod service;


pub use cache::{RateCache, spawn_sweeper};
pub use openapi::ApiDoc;
pub use service::RateService;
