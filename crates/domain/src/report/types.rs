//! Weekly report function inputs, outputs and summary outcomes

use serde::{Deserialize, Serialize};

use crate::function::{FunctionDefinition, ParameterSchema, ParameterSpec};

/// Callback id of the weekly report function.
pub const WEEKLY_REPORT_CALLBACK_ID: &str = "weekly_report";

/// Value emitted as `summary_report` when no summary was generated.
pub const PLACEHOLDER_SUMMARY: &str = "null";

/// Declaration of the weekly report function.
#[must_use]
pub fn weekly_report_definition() -> FunctionDefinition {
    FunctionDefinition {
        callback_id: WEEKLY_REPORT_CALLBACK_ID.to_string(),
        title: "Weekly Report".to_string(),
        description: "pulls Salesforce data to generate an appealing weekly report".to_string(),
        source_file: "functions/weekly_report_function.ts".to_string(),
        input_parameters: ParameterSchema::default().property(
            "salesforce_data",
            ParameterSpec::string("salesforce's report flow"),
        ),
        output_parameters: ParameterSchema::default().property(
            "summary_report",
            ParameterSpec::string("An AI summary of the report"),
        ),
    }
}

/// Inputs of the weekly report function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct WeeklyReportInput {
    /// Raw CRM report data.
    #[serde(default)]
    pub salesforce_data: Option<String>,
}

impl WeeklyReportInput {
    /// Creates input carrying `data`.
    #[must_use]
    pub fn new(data: impl Into<String>) -> Self {
        Self {
            salesforce_data: Some(data.into()),
        }
    }
}

/// Whether a summary was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryStatus {
    /// The endpoint returned generated text.
    Generated,
    /// The endpoint answered without generated text.
    Empty,
    /// The summarization request failed.
    Failed,
}

/// Result of asking the endpoint for a summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryOutcome {
    /// Generated text.
    Generated(String),
    /// Success response with no generated text.
    Empty,
    /// The request failed.
    Failed {
        /// Error description.
        reason: String,
    },
}

impl SummaryOutcome {
    /// Status of this outcome.
    #[must_use]
    pub const fn status(&self) -> SummaryStatus {
        match self {
            Self::Generated(_) => SummaryStatus::Generated,
            Self::Empty => SummaryStatus::Empty,
            Self::Failed { .. } => SummaryStatus::Failed,
        }
    }

    /// Converts the outcome into function outputs.
    #[must_use]
    pub fn into_output(self) -> WeeklyReportOutput {
        let summary_status = self.status();
        match self {
            Self::Generated(text) => WeeklyReportOutput {
                summary_report: text,
                summary_status,
                error: None,
            },
            Self::Empty => WeeklyReportOutput {
                summary_report: PLACEHOLDER_SUMMARY.to_string(),
                summary_status,
                error: None,
            },
            Self::Failed { reason } => WeeklyReportOutput {
                summary_report: PLACEHOLDER_SUMMARY.to_string(),
                summary_status,
                error: Some(reason),
            },
        }
    }
}

/// Outputs of the weekly report function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyReportOutput {
    /// Generated summary, or [`PLACEHOLDER_SUMMARY`].
    pub summary_report: String,
    /// How the summary was obtained.
    pub summary_status: SummaryStatus,
    /// Failure description when `summary_status` is `failed`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Response body of the summarization endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerationResponse {
    /// Generation payload.
    #[serde(default)]
    pub generation: Option<Generation>,
}

/// Generation payload of [`GenerationResponse`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Generation {
    /// The generated text.
    #[serde(default, rename = "generatedText")]
    pub generated_text: Option<String>,
}

impl GenerationResponse {
    /// Converts the response into an outcome; blank text counts as empty.
    #[must_use]
    pub fn into_outcome(self) -> SummaryOutcome {
        match self.generation.and_then(|g| g.generated_text) {
            Some(text) if !text.is_empty() => SummaryOutcome::Generated(text),
            _ => SummaryOutcome::Empty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_generation_response_outcomes() {
        let parse = |raw: &str| {
            serde_json::from_str::<GenerationResponse>(raw)
                .unwrap_or_default()
                .into_outcome()
        };

        assert_eq!(
            parse(r#"{"generation":{"generatedText":"📌 ..."}}"#),
            SummaryOutcome::Generated("📌 ...".to_string())
        );
        assert_eq!(parse(r#"{"generation":{"generatedText":""}}"#), SummaryOutcome::Empty);
        assert_eq!(parse(r#"{"generation":{}}"#), SummaryOutcome::Empty);
        assert_eq!(parse("{}"), SummaryOutcome::Empty);
    }

    #[test]
    fn test_outcome_into_output() {
        let output = SummaryOutcome::Failed {
            reason: "connection refused".to_string(),
        }
        .into_output();

        assert_eq!(output.summary_report, PLACEHOLDER_SUMMARY);
        assert_eq!(output.summary_status, SummaryStatus::Failed);
        assert_eq!(output.error.as_deref(), Some("connection refused"));

        let output = SummaryOutcome::Empty.into_output();
        assert_eq!(output.summary_report, PLACEHOLDER_SUMMARY);
        assert_eq!(output.error, None);
    }

    #[test]
    fn test_output_serialization_omits_missing_error() {
        let value = serde_json::to_value(SummaryOutcome::Generated("hi".to_string()).into_output())
            .unwrap_or_default();
        assert_eq!(
            value,
            serde_json::json!({ "summary_report": "hi", "summary_status": "generated" })
        );
    }

    #[test]
    fn test_definition_declares_string_parameters() {
        let definition = weekly_report_definition();
        assert_eq!(definition.callback_id, WEEKLY_REPORT_CALLBACK_ID);
        assert!(definition.input_parameters.required.is_empty());
        assert!(
            definition
                .input_parameters
                .validate(&serde_json::json!({ "salesforce_data": "Deal X" }))
                .is_ok()
        );
        assert!(
            definition
                .output_parameters
                .properties
                .contains_key("summary_report")
        );
    }
}
