//! Fakes shared by the unit tests of this crate.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration as StdDuration;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use sf_report_domain::{HttpRequest, HttpResponse};

use crate::config::{CLIENT_ID, CLIENT_SECRET, SALESFORCE_API_URL, SALESFORCE_ORG_URL};
use crate::ports::{Clock, HttpClient, HttpClientError};

pub const ORG_URL: &str = "https://org.my.salesforce.com";
pub const TOKEN_URL: &str = "https://org.my.salesforce.com/services/oauth2/token";
pub const API_URL: &str = "https://api.salesforce.com/einstein/platform/v1/models/gpt/generations";

/// Manually driven clock.
#[derive(Clone)]
pub struct FakeClock {
    now: Arc<Mutex<DateTime<Utc>>>,
}

impl FakeClock {
    pub fn new() -> Self {
        Self {
            now: Arc::new(Mutex::new(
                DateTime::from_timestamp(1_700_000_000, 0).unwrap_or_default(),
            )),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().expect("Lock poisoned");
        *now += by;
    }
}

impl Clock for FakeClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().expect("Lock poisoned")
    }
}

type Handler = dyn Fn(&HttpRequest) -> Result<HttpResponse, HttpClientError> + Send + Sync;

/// HTTP client answering from a closure and recording every request.
pub struct FakeHttpClient {
    handler: Box<Handler>,
    requests: Mutex<Vec<HttpRequest>>,
    delay: Option<StdDuration>,
}

impl FakeHttpClient {
    pub fn new(
        handler: impl Fn(&HttpRequest) -> Result<HttpResponse, HttpClientError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            handler: Box::new(handler),
            requests: Mutex::new(Vec::new()),
            delay: None,
        }
    }

    /// Token endpoint issuing `token`, summarization endpoint answering `summary`.
    pub fn salesforce(token: &'static str, summary: &'static str) -> Self {
        Self::new(move |request| {
            if request.url == TOKEN_URL {
                Ok(token_response(token))
            } else {
                Ok(HttpResponse::json(&serde_json::json!({
                    "generation": { "generatedText": summary }
                })))
            }
        })
    }

    pub fn with_delay(mut self, delay: StdDuration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().expect("Lock poisoned").clone()
    }

    pub fn calls_to(&self, url: &str) -> usize {
        self.requests().iter().filter(|r| r.url == url).count()
    }
}

#[async_trait]
impl HttpClient for FakeHttpClient {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, HttpClientError> {
        self.requests
            .lock()
            .expect("Lock poisoned")
            .push(request.clone());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        (self.handler)(&request)
    }
}

pub fn token_response(token: &str) -> HttpResponse {
    HttpResponse::json(&serde_json::json!({
        "access_token": token,
        "instance_url": ORG_URL,
        "token_type": "Bearer",
        "issued_at": "1700000000000",
    }))
}

pub fn oauth_env() -> HashMap<String, String> {
    [
        (SALESFORCE_ORG_URL, ORG_URL),
        (CLIENT_ID, "client-id"),
        (CLIENT_SECRET, "client-secret"),
        (SALESFORCE_API_URL, API_URL),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}
