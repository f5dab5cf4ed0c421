//! SF Report Application - Use cases and ports
//!
//! This crate defines the application layer with:
//! - Port traits (interfaces for external dependencies)
//! - The OAuth2 token manager
//! - The weekly report use case
//! - Application-level error handling

pub mod auth;
pub mod config;
pub mod error;
pub mod ports;
pub mod report;

#[cfg(test)]
mod test_support;

pub use auth::{TokenManager, TokenStatus, TokenStore};
pub use config::OAuthSettings;
pub use error::{ApplicationError, ApplicationResult};
pub use ports::{Clock, EnvSource, HttpClient, HttpClientError};
pub use report::{FunctionInvocation, FunctionResponse, SummaryError, WeeklyReport};
