//! HTTP Client port

use async_trait::async_trait;
use sf_report_domain::{HttpRequest, HttpResponse};
use thiserror::Error;

/// Errors raised by an HTTP client adapter before a response is available.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HttpClientError {
    /// The URL could not be parsed.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The request did not complete in time.
    #[error("request timed out after {timeout_ms} ms")]
    Timeout {
        /// Configured timeout.
        timeout_ms: u64,
    },

    /// The connection could not be established.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// The target host is not on the app's outgoing allow-list.
    #[error("outgoing domain not allowed: {host}")]
    DomainNotAllowed {
        /// Rejected host.
        host: String,
    },

    /// Any other transport error.
    #[error("{0}")]
    Other(String),
}

/// Port for executing HTTP requests.
///
/// Non-2xx responses are returned as `Ok`; only transport failures are errors.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Executes an HTTP request and returns the response.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails due to network issues,
    /// timeout, or policy rejection.
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, HttpClientError>;
}
