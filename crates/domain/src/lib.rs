//! SF Report Domain - Core types
//!
//! This crate defines the domain model for the Salesforce weekly report
//! function. All types here are pure Rust with no I/O dependencies.

pub mod auth;
pub mod error;
pub mod function;
pub mod manifest;
pub mod report;
pub mod request;
pub mod response;

pub use auth::{AuthError, CachedCredential, LifetimePolicy, token_preview};
pub use error::{DomainError, DomainResult};
pub use function::{FunctionDefinition, ParameterSchema, ParameterSpec, ParameterType};
pub use manifest::AppManifest;
pub use report::{
    PLACEHOLDER_SUMMARY, SummaryOutcome, SummaryPrompt, SummaryStatus, WeeklyReportInput,
    WeeklyReportOutput,
};
pub use request::{FORM_CONTENT_TYPE, HttpMethod, HttpRequest, JSON_CONTENT_TYPE, RequestBody};
pub use response::{HttpResponse, StatusCode};
