//! Weekly report function.

mod invocation;
mod weekly_report;

pub use invocation::{FunctionInvocation, FunctionResponse};
pub use weekly_report::{APP_CONTEXT, CLIENT_FEATURE_ID, SummaryError, WeeklyReport};
