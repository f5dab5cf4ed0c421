//! HTTP Client implementation using reqwest.
//!
//! This adapter implements the `HttpClient` port using the reqwest library.
//! It carries both outbound calls of the function: the OAuth token request
//! and the summarization request.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, Url};
use sf_report_application::ports::{HttpClient, HttpClientError};
use sf_report_domain::{HttpMethod, HttpRequest, HttpResponse, RequestBody};
use tracing::debug;

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client implementation using reqwest.
///
/// Wraps `reqwest::Client` and implements the `HttpClient` port from the
/// application layer.
pub struct ReqwestHttpClient {
    client: Client,
    timeout: Duration,
}

impl ReqwestHttpClient {
    /// Creates a new HTTP client with default settings.
    ///
    /// Default configuration:
    /// - Request timeout: 30 seconds
    /// - Follow redirects: up to 10
    /// - TLS verification: enabled
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be created.
    pub fn new() -> Result<Self, HttpClientError> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// Creates a new HTTP client with a custom request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be created.
    pub fn with_timeout(timeout: Duration) -> Result<Self, HttpClientError> {
        let client = Client::builder()
            .user_agent(concat!("sf-report/", env!("CARGO_PKG_VERSION")))
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .map_err(|e| HttpClientError::Other(e.to_string()))?;

        Ok(Self { client, timeout })
    }

    /// Request timeout applied to every call.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Converts domain `HttpMethod` to reqwest `Method`.
    const fn to_reqwest_method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
        }
    }

    /// Encodes the domain body into raw bytes.
    fn encode_body(body: &RequestBody) -> Result<Option<Vec<u8>>, HttpClientError> {
        match body {
            RequestBody::None => Ok(None),
            RequestBody::Json(value) => serde_json::to_vec(value)
                .map(Some)
                .map_err(|e| HttpClientError::Other(format!("Failed to encode JSON body: {e}"))),
            RequestBody::Form(fields) => serde_urlencoded::to_string(fields)
                .map(|encoded| Some(encoded.into_bytes()))
                .map_err(|e| HttpClientError::Other(format!("Failed to encode form body: {e}"))),
        }
    }

    /// Maps reqwest errors to `HttpClientError`.
    fn map_error(error: &reqwest::Error, timeout_ms: u64) -> HttpClientError {
        if error.is_timeout() {
            return HttpClientError::Timeout { timeout_ms };
        }

        if error.is_connect() {
            return HttpClientError::ConnectionFailed(error.to_string());
        }

        if error.is_redirect() {
            return HttpClientError::Other("too many redirects (max 10)".to_string());
        }

        HttpClientError::Other(error.to_string())
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, HttpClientError> {
        let url = Url::parse(&request.url)
            .map_err(|e| HttpClientError::InvalidUrl(format!("{e}: {}", request.url)))?;
        let timeout_ms = u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX);

        let mut builder = self
            .client
            .request(Self::to_reqwest_method(request.method), url)
            .timeout(self.timeout);

        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        // Content-Type from the body unless the caller set one
        if let Some(content_type) = request.body.content_type()
            && request.get_header("content-type").is_none()
        {
            builder = builder.header("Content-Type", content_type);
        }

        if let Some(bytes) = Self::encode_body(&request.body)? {
            builder = builder.body(bytes);
        }

        debug!(method = %request.method, url = %request.url, "sending request");

        let response = builder
            .send()
            .await
            .map_err(|e| Self::map_error(&e, timeout_ms))?;

        let status = response.status().as_u16();
        let headers: Vec<(String, String)> = response
            .headers()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("<binary>").to_string()))
            .collect();

        let body_bytes = response
            .bytes()
            .await
            .map_err(|e| HttpClientError::Other(format!("Failed to read body: {e}")))?;

        debug!(status, bytes = body_bytes.len(), "response received");

        Ok(HttpResponse {
            status: status.into(),
            headers,
            body: String::from_utf8_lossy(&body_bytes).into_owned(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_to_reqwest_method() {
        assert_eq!(
            ReqwestHttpClient::to_reqwest_method(HttpMethod::Get),
            Method::GET
        );
        assert_eq!(
            ReqwestHttpClient::to_reqwest_method(HttpMethod::Post),
            Method::POST
        );
    }

    #[test]
    fn test_client_creation() {
        let client = ReqwestHttpClient::with_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(client.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_form_body_is_urlencoded() {
        let body = RequestBody::form([
            ("grant_type", "client_credentials"),
            ("client_id", "id with space"),
            ("client_secret", "s&cret"),
        ]);

        let bytes = ReqwestHttpClient::encode_body(&body).unwrap().unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "grant_type=client_credentials&client_id=id+with+space&client_secret=s%26cret"
        );
    }

    #[test]
    fn test_json_body_is_serialized() {
        let body = RequestBody::Json(serde_json::json!({ "prompt": "hi" }));

        let bytes = ReqwestHttpClient::encode_body(&body).unwrap().unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap(), r#"{"prompt":"hi"}"#);
        assert_eq!(ReqwestHttpClient::encode_body(&RequestBody::None).unwrap(), None);
    }

    #[tokio::test]
    async fn test_invalid_url() {
        let client = ReqwestHttpClient::new().unwrap();
        let result = client.execute(HttpRequest::post("not a url")).await;
        assert!(matches!(result, Err(HttpClientError::InvalidUrl(_))));
    }
}
