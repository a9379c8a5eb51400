//! OpenAPI specification and documentation.

#![allow(dead_code)] // Path functions are only used by utoipa for documentation generation

use std::collections::HashMap;

use fx_types::HealthResponse;
use utoipa::OpenApi;

use crate::inbound::RatesQuery;

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    )
)]
async fn health() {}

/// Current exchange rates
///
/// Returns every known rate, or a single rate when `currency` is given.
#[utoipa::path(
    get,
    path = "/current_rates",
    tag = "rates",
    params(RatesQuery),
    responses(
        (status = 200, description = "Currency code to rate mapping", content_type = "application/json",
            body = HashMap<String, f64>, example = json!({"AUD": 1.27, "EUR": 0.85, "SGD": 1.36})),
        (status = 404, description = "Unknown currency or zero rate", content_type = "text/plain", body = String),
        (status = 500, description = "Upstream unavailable or returned malformed data", content_type = "text/plain", body = String)
    )
)]
async fn current_rates() {}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "FX Rate Proxy",
        description = "Current foreign-exchange rates served from a time-bounded cache"
    ),
    paths(health, current_rates),
    components(schemas(HealthResponse)),
    tags(
        (name = "health", description = "Service health"),
        (name = "rates", description = "Exchange rates")
    )
)]
pub struct ApiDoc;
