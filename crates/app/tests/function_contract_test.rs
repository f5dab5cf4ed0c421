//! Integration tests for the function's platform contract
//!
//! These tests check the manifest and invocation shapes the host platform
//! sees, wired the same way the binary wires them.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use pretty_assertions::assert_eq;
use sf_report_application::ports::{HttpClient, HttpClientError};
use sf_report_application::{ApplicationError, FunctionInvocation};
use sf_report_domain::{AppManifest, AuthError, HttpRequest, HttpResponse};
use sf_report_infrastructure::{Runtime, RuntimeSettings};

#[derive(Default)]
struct NoNetwork {
    calls: AtomicUsize,
}

#[async_trait]
impl HttpClient for NoNetwork {
    async fn execute(&self, _request: HttpRequest) -> Result<HttpResponse, HttpClientError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(HttpClientError::ConnectionFailed("offline".to_string()))
    }
}

fn runtime(env: HashMap<String, String>, transport: Arc<NoNetwork>) -> Runtime {
    Runtime::with_transport(
        Arc::new(env),
        AppManifest::default(),
        transport,
        RuntimeSettings::default(),
    )
    .unwrap()
}

#[test]
fn test_manifest_json_shape() {
    let value = serde_json::to_value(AppManifest::default()).unwrap();

    assert_eq!(value["name"], "Weekly Report");
    assert_eq!(
        value["description"],
        "Summarize and format Salesforce data with EinsteinAI"
    );
    assert_eq!(value["icon"], "assets/default_new_app_icon.png");
    assert_eq!(
        value["outgoingDomains"],
        serde_json::json!(["api.salesforce.com", "d7u000000i8qbuak.my.salesforce.com"])
    );
    assert_eq!(
        value["botScopes"],
        serde_json::json!(["commands", "chat:write", "chat:write.public"])
    );
    assert_eq!(value["workflows"], serde_json::json!([]));
    assert_eq!(value["functions"][0]["callback_id"], "weekly_report");
}

#[tokio::test]
async fn test_missing_client_credentials_fail_before_network() {
    let transport = Arc::new(NoNetwork::default());
    let env: HashMap<String, String> = [(
        "SALESFORCE_ORG_URL".to_string(),
        "https://d7u000000i8qbuak.my.salesforce.com".to_string(),
    )]
    .into_iter()
    .collect();
    let runtime = runtime(env.clone(), transport.clone());

    let error = runtime
        .report()
        .handle(&FunctionInvocation::with_salesforce_data("Deal X", env))
        .await
        .unwrap_err();

    let ApplicationError::Auth(AuthError::Configuration { message }) = error else {
        panic!("expected configuration error, got {error:?}");
    };
    assert_eq!(
        message,
        "CLIENT_ID or CLIENT_SECRET is not set in environment variables."
    );
    assert_eq!(transport.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_transport_failure_surfaces_as_network_error() {
    let transport = Arc::new(NoNetwork::default());
    let env: HashMap<String, String> = [
        (
            "SALESFORCE_ORG_URL",
            "https://d7u000000i8qbuak.my.salesforce.com",
        ),
        ("CLIENT_ID", "id"),
        ("CLIENT_SECRET", "secret"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();
    let runtime = runtime(env.clone(), transport.clone());

    let error = runtime.tokens().get_token().await.unwrap_err();

    assert!(matches!(error, AuthError::Network { .. }));
    assert_eq!(transport.calls.load(Ordering::SeqCst), 1);
}
