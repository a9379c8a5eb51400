//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::ser::{PrettyFormatter, Serializer};
use utoipa::{IntoParams, OpenApi};

use fx_types::{AppError, HealthResponse, RateProvider};

use crate::RateService;
use crate::openapi::ApiDoc;

/// Application state shared across handlers.
pub struct AppState<P: RateProvider> {
    pub service: RateService<P>,
}

/// Query string of `GET /current_rates`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RatesQuery {
    /// Currency code to look up (case-insensitive)
    #[param(example = "SGD")]
    pub currency: Option<String>,
}

impl RatesQuery {
    /// Builds the query from raw pairs. A repeated `currency` keeps its first value.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let currency = pairs
            .into_iter()
            .find(|(key, _)| key == "currency")
            .map(|(_, value)| value);
        Self { currency }
    }
}

/// Wrapper to implement IntoResponse for AppError (orphan rule workaround).
///
/// Error bodies are the plain status text.
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            e if e.is_not_found() => StatusCode::NOT_FOUND,
            AppError::Upstream(e) => {
                tracing::error!(error = %e, "rate lookup failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
            e => {
                tracing::error!(error = %e, "internal error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, status.canonical_reason().unwrap_or_default()).into_response()
    }
}

/// JSON body indented with four spaces.
pub struct PrettyJson<T>(pub T);

impl<T: Serialize> IntoResponse for PrettyJson<T> {
    fn into_response(self) -> Response {
        let mut body = Vec::new();
        let mut ser = Serializer::with_formatter(&mut body, PrettyFormatter::with_indent(b"    "));

        match self.0.serialize(&mut ser) {
            Ok(()) => (
                [(
                    header::CONTENT_TYPE,
                    HeaderValue::from_static("application/json"),
                )],
                body,
            )
                .into_response(),
            Err(e) => ApiError(AppError::Internal(e.to_string())).into_response(),
        }
    }
}

/// Health check endpoint.
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse::healthy())
}

/// OpenAPI document.
pub async fn openapi() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}

/// Current rates, all of them or a single currency.
#[tracing::instrument(skip(state))]
pub async fn current_rates<P: RateProvider>(
    State(state): State<Arc<AppState<P>>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<impl IntoResponse, ApiError> {
    let query = RatesQuery::from_pairs(pairs);
    let rates = state
        .service
        .fetch_rates(query.currency.as_deref())
        .await?;
    Ok(PrettyJson(rates))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_query_without_currency() {
        assert_eq!(RatesQuery::from_pairs(pairs(&[("other", "x")])).currency, None);
    }

    #[test]
    fn test_repeated_currency_keeps_first() {
        let query = RatesQuery::from_pairs(pairs(&[("currency", "SGD"), ("currency", "AUD")]));
        assert_eq!(query.currency.as_deref(), Some("SGD"));
    }
}
