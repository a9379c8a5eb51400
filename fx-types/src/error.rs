//! Error types for the rate proxy.

/// Failures of a single upstream fetch.
///
/// `Clone` because one in-flight fetch result is handed to every waiting request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UpstreamError {
    #[error("Upstream unavailable: {0}")]
    Unavailable(String),

    #[error("Upstream returned HTTP status {0}")]
    Status(u16),

    #[error("Malformed upstream response: {0}")]
    Malformed(String),
}

/// Application-level errors (for HTTP responses).
///
/// Maps cleanly to HTTP status codes.
#[derive(Debug, Clone, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    #[error("Currency not found: {0}")]
    CurrencyNotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Whether the error means "no such rate" rather than a failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::CurrencyNotFound(_))
    }
}
