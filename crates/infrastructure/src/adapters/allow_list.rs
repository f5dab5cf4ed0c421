//! Outgoing-domain enforcement.
//!
//! Wraps another `HttpClient` and refuses requests whose host is not listed
//! in the app manifest. Rejection happens before any network I/O.

use std::sync::Arc;

use async_trait::async_trait;
use sf_report_application::ports::{HttpClient, HttpClientError};
use sf_report_domain::{AppManifest, HttpRequest, HttpResponse};
use tracing::warn;

/// `HttpClient` decorator enforcing the manifest's outgoing domains.
pub struct AllowListHttpClient {
    inner: Arc<dyn HttpClient>,
    manifest: AppManifest,
}

impl AllowListHttpClient {
    /// Wraps `inner` with the allow-list of `manifest`.
    #[must_use]
    pub fn new(inner: Arc<dyn HttpClient>, manifest: AppManifest) -> Self {
        Self { inner, manifest }
    }

    /// The manifest whose allow-list is enforced.
    #[must_use]
    pub const fn manifest(&self) -> &AppManifest {
        &self.manifest
    }
}

#[async_trait]
impl HttpClient for AllowListHttpClient {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, HttpClientError> {
        let url = request
            .parsed_url()
            .map_err(|e| HttpClientError::InvalidUrl(e.to_string()))?;
        let host = url.host_str().unwrap_or_default();

        if !self.manifest.allows_host(host) {
            warn!(host, "blocked request to undeclared outgoing domain");
            return Err(HttpClientError::DomainNotAllowed {
                host: host.to_ascii_lowercase(),
            });
        }

        self.inner.execute(request).await
    }
}
