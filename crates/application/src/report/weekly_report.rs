//! Weekly report use case

use std::sync::Arc;

use sf_report_domain::report::{GenerationResponse, SummaryPrompt};
use sf_report_domain::{
    AuthError, CachedCredential, HttpRequest, RequestBody, StatusCode, SummaryOutcome,
    WeeklyReportInput, WeeklyReportOutput,
};
use thiserror::Error;
use tracing::{error, info, warn};

use crate::auth::TokenManager;
use crate::config::summary_api_url;
use crate::ports::{EnvSource, HttpClient, HttpClientError};

/// Value of the `x-sfdc-app-context` header.
pub const APP_CONTEXT: &str = "EinsteinGPT";
/// Value of the `x-client-feature-id` header.
pub const CLIENT_FEATURE_ID: &str = "ai-platform-models-connected-app";

/// Errors of the summarization request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SummaryError {
    /// `SALESFORCE_API_URL` is not configured.
    #[error("SALESFORCE_API_URL is not set")]
    MissingApiUrl,

    /// The request could not be sent.
    #[error("{0}")]
    Http(#[from] HttpClientError),

    /// The endpoint answered with a non-success status.
    #[error("summarization request failed: {status}. Response: {body}")]
    Upstream {
        /// Response status.
        status: StatusCode,
        /// Response body.
        body: String,
    },

    /// The response body was not the expected JSON.
    #[error("invalid summarization response: {0}")]
    InvalidResponse(String),
}

/// Summarizes CRM report data into a formatted weekly report.
///
/// Token failures are returned as errors. Failures of the summarization call
/// itself are logged and reported through the output's status and the
/// placeholder summary.
pub struct WeeklyReport {
    tokens: Arc<TokenManager>,
    http_client: Arc<dyn HttpClient>,
}

impl WeeklyReport {
    /// Creates a new `WeeklyReport` use case.
    #[must_use]
    pub fn new(tokens: Arc<TokenManager>, http_client: Arc<dyn HttpClient>) -> Self {
        Self {
            tokens,
            http_client,
        }
    }

    /// The token manager backing this use case.
    #[must_use]
    pub fn tokens(&self) -> &TokenManager {
        &self.tokens
    }

    /// Executes the use case.
    ///
    /// # Arguments
    /// * `input` - Function inputs
    /// * `env` - Invocation environment, read for `SALESFORCE_API_URL`
    ///
    /// # Errors
    /// Returns an error if no access token could be obtained.
    pub async fn execute(
        &self,
        input: &WeeklyReportInput,
        env: &dyn EnvSource,
    ) -> Result<WeeklyReportOutput, AuthError> {
        let prompt = SummaryPrompt::new(input.salesforce_data.as_deref().unwrap_or_default());

        let credential = self.tokens.credential().await?;

        let outcome = match self.summarize(&prompt, &credential, env).await {
            Ok(outcome) => outcome,
            Err(e) => {
                if matches!(&e, SummaryError::Upstream { status, .. } if status.as_u16() == 401) {
                    self.tokens.invalidate().await;
                }
                error!(error = %e, "error making Salesforce API call");
                SummaryOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        };

        match &outcome {
            SummaryOutcome::Generated(text) => info!(chars = text.len(), "summary generated"),
            SummaryOutcome::Empty => warn!("summarization response had no generated text"),
            SummaryOutcome::Failed { .. } => {}
        }

        Ok(outcome.into_output())
    }

    async fn summarize(
        &self,
        prompt: &SummaryPrompt,
        credential: &CachedCredential,
        env: &dyn EnvSource,
    ) -> Result<SummaryOutcome, SummaryError> {
        let api_url = summary_api_url(env).ok_or(SummaryError::MissingApiUrl)?;

        let request = HttpRequest::post(api_url)
            .header("Authorization", credential.authorization_header())
            .header("x-sfdc-app-context", APP_CONTEXT)
            .header("x-client-feature-id", CLIENT_FEATURE_ID)
            .body(RequestBody::Json(prompt.to_request_body()));

        let response = self.http_client.execute(request).await?;

        if !response.is_success() {
            return Err(SummaryError::Upstream {
                status: response.status,
                body: response.body,
            });
        }

        let generation: GenerationResponse = response
            .json_body()
            .map_err(|e| SummaryError::InvalidResponse(e.to_string()))?;

        Ok(generation.into_outcome())
    }
}
