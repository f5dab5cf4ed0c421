//! Weekly report domain types

mod prompt;
mod types;

pub use prompt::{ReportSection, SummaryPrompt};
pub use types::{
    Generation, GenerationResponse, PLACEHOLDER_SUMMARY, SummaryOutcome, SummaryStatus,
    WEEKLY_REPORT_CALLBACK_ID, WeeklyReportInput, WeeklyReportOutput, weekly_report_definition,
};
