//! Platform invocation envelope for the weekly report function

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use sf_report_domain::report::weekly_report_definition;
use sf_report_domain::{WeeklyReportInput, WeeklyReportOutput};

use super::WeeklyReport;
use crate::error::ApplicationResult;

/// A function call as delivered by the host platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionInvocation {
    /// Input values keyed by parameter name.
    #[serde(default = "empty_inputs")]
    pub inputs: serde_json::Value,
    /// Environment variables of the invocation.
    #[serde(default)]
    pub env: HashMap<String, String>,
}

fn empty_inputs() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

impl FunctionInvocation {
    /// Creates an invocation with a single `salesforce_data` input.
    #[must_use]
    pub fn with_salesforce_data(data: impl Into<String>, env: HashMap<String, String>) -> Self {
        Self {
            inputs: serde_json::json!({ "salesforce_data": data.into() }),
            env,
        }
    }
}

/// A function result handed back to the host platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionResponse {
    /// Output values.
    pub outputs: WeeklyReportOutput,
}

impl WeeklyReport {
    /// Validates a platform invocation and runs the report.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Domain` for inputs that do not match the
    /// function definition and `ApplicationError::Auth` if no token could be
    /// obtained.
    pub async fn handle(
        &self,
        invocation: &FunctionInvocation,
    ) -> ApplicationResult<FunctionResponse> {
        weekly_report_definition()
            .input_parameters
            .validate(&invocation.inputs)?;
        let input: WeeklyReportInput = serde_json::from_value(invocation.inputs.clone())?;

        let outputs = self.execute(&input, &invocation.env).await?;
        Ok(FunctionResponse { outputs })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::auth::TokenManager;
    use crate::error::ApplicationError;
    use crate::test_support::{FakeClock, FakeHttpClient, oauth_env};
    use pretty_assertions::assert_eq;
    use sf_report_domain::{DomainError, SummaryStatus};
    use std::sync::Arc;

    fn use_case(http: &Arc<FakeHttpClient>) -> WeeklyReport {
        let tokens = TokenManager::new(
            http.clone(),
            Arc::new(FakeClock::new()),
            Arc::new(oauth_env()),
        );
        WeeklyReport::new(Arc::new(tokens), http.clone())
    }

    #[tokio::test]
    async fn test_handle_returns_outputs() {
        let http = Arc::new(FakeHttpClient::salesforce("abc123", "📌 ..."));
        let report = use_case(&http);

        let response = report
            .handle(&FunctionInvocation::with_salesforce_data(
                "Deal X closed, $10k",
                oauth_env(),
            ))
            .await
            .unwrap();

        assert_eq!(response.outputs.summary_report, "📌 ...");
        assert_eq!(response.outputs.summary_status, SummaryStatus::Generated);
    }

    #[tokio::test]
    async fn test_handle_rejects_unknown_inputs() {
        let http = Arc::new(FakeHttpClient::salesforce("abc123", "📌 ..."));
        let report = use_case(&http);
        let invocation = FunctionInvocation {
            inputs: serde_json::json!({ "salesforce_data": "x", "channel": "C1" }),
            env: oauth_env(),
        };

        let error = report.handle(&invocation).await.unwrap_err();
        assert!(matches!(
            error,
            ApplicationError::Domain(DomainError::UnknownParameter(ref name)) if name == "channel"
        ));
        assert!(http.requests().is_empty());
    }

    #[tokio::test]
    async fn test_handle_rejects_wrong_type() {
        let http = Arc::new(FakeHttpClient::salesforce("abc123", "📌 ..."));
        let report = use_case(&http);
        let invocation = FunctionInvocation {
            inputs: serde_json::json!({ "salesforce_data": 10 }),
            env: oauth_env(),
        };

        let error = report.handle(&invocation).await.unwrap_err();
        assert!(matches!(
            error,
            ApplicationError::Domain(DomainError::InvalidParameterType { .. })
        ));
    }

    #[test]
    fn test_invocation_deserializes_platform_payload() {
        let invocation: FunctionInvocation = serde_json::from_str(
            r#"{"inputs":{"salesforce_data":"Deal X"},"env":{"SALESFORCE_API_URL":"https://api.salesforce.com"}}"#,
        )
        .unwrap();

        assert_eq!(invocation.inputs["salesforce_data"], "Deal X");
        assert_eq!(
            invocation.env.get("SALESFORCE_API_URL").map(String::as_str),
            Some("https://api.salesforce.com")
        );

        let empty: FunctionInvocation = serde_json::from_str("{}").unwrap();
        assert!(empty.inputs.as_object().unwrap().is_empty());
    }

    #[test]
    fn test_response_serializes_outputs() {
        let response = FunctionResponse {
            outputs: sf_report_domain::SummaryOutcome::Generated("hi".to_string()).into_output(),
        };
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["outputs"]["summary_report"], "hi");
    }
}
