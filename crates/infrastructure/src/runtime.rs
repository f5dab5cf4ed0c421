//! Production wiring of the weekly report function.
//!
//! Builds the reqwest adapter behind the manifest allow-list and hands it to
//! a shared `TokenManager` and the `WeeklyReport` use case.

use std::sync::Arc;
use std::time::Duration;

use sf_report_application::ports::{EnvSource, HttpClient, HttpClientError};
use sf_report_application::{TokenManager, WeeklyReport};
use sf_report_domain::AppManifest;
use thiserror::Error;
use tracing::debug;

use crate::adapters::{AllowListHttpClient, DEFAULT_TIMEOUT, ReqwestHttpClient, SystemClock};

/// Request timeout in seconds.
pub const HTTP_TIMEOUT_SECS: &str = "SF_REPORT_HTTP_TIMEOUT_SECS";
/// Maximum age of the cached credential entry in seconds.
pub const TOKEN_MAX_AGE_SECS: &str = "SF_REPORT_TOKEN_MAX_AGE_SECS";

/// Errors raised while wiring the runtime.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// A tuning variable holds something other than a positive integer.
    #[error("{name} must be a positive number of seconds, got `{value}`")]
    InvalidSetting {
        /// Variable name.
        name: &'static str,
        /// Rejected value.
        value: String,
    },

    /// The HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] HttpClientError),
}

/// Adapter tuning read from the environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuntimeSettings {
    /// Timeout applied to every outbound request.
    pub http_timeout: Duration,
    /// Maximum age of the cached credential entry.
    pub token_max_age: Duration,
}

impl Default for RuntimeSettings {
    fn default() -> Self {
        Self {
            http_timeout: DEFAULT_TIMEOUT,
            token_max_age: Duration::from_secs(
                sf_report_application::auth::DEFAULT_MAX_AGE_SECS.unsigned_abs(),
            ),
        }
    }
}

impl RuntimeSettings {
    /// Reads settings, falling back to defaults for unset variables.
    ///
    /// # Errors
    ///
    /// Returns `RuntimeError::InvalidSetting` for unparsable or zero values.
    pub fn from_env(env: &dyn EnvSource) -> Result<Self, RuntimeError> {
        let defaults = Self::default();
        Ok(Self {
            http_timeout: seconds(env, HTTP_TIMEOUT_SECS)?.unwrap_or(defaults.http_timeout),
            token_max_age: seconds(env, TOKEN_MAX_AGE_SECS)?.unwrap_or(defaults.token_max_age),
        })
    }
}

fn seconds(env: &dyn EnvSource, name: &'static str) -> Result<Option<Duration>, RuntimeError> {
    let Some(value) = env.non_empty(name) else {
        return Ok(None);
    };
    match value.parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Some(Duration::from_secs(secs))),
        _ => Err(RuntimeError::InvalidSetting { name, value }),
    }
}

/// Fully wired function runtime.
pub struct Runtime {
    manifest: AppManifest,
    report: WeeklyReport,
}

impl Runtime {
    /// Wires the runtime against the real network.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings are invalid or the HTTP client cannot
    /// be built.
    pub fn build(env: Arc<dyn EnvSource>, manifest: AppManifest) -> Result<Self, RuntimeError> {
        let settings = RuntimeSettings::from_env(env.as_ref())?;
        let transport: Arc<dyn HttpClient> =
            Arc::new(ReqwestHttpClient::with_timeout(settings.http_timeout)?);
        Self::with_transport(env, manifest, transport, settings)
    }

    /// Wires the runtime over a caller-provided transport.
    ///
    /// The manifest allow-list is applied on top of `transport`.
    ///
    /// # Errors
    ///
    /// Returns `RuntimeError::InvalidSetting` if the token max age does not
    /// fit a signed duration.
    pub fn with_transport(
        env: Arc<dyn EnvSource>,
        manifest: AppManifest,
        transport: Arc<dyn HttpClient>,
        settings: RuntimeSettings,
    ) -> Result<Self, RuntimeError> {
        let max_age = chrono::Duration::from_std(settings.token_max_age).map_err(|_| {
            RuntimeError::InvalidSetting {
                name: TOKEN_MAX_AGE_SECS,
                value: settings.token_max_age.as_secs().to_string(),
            }
        })?;

        let http: Arc<dyn HttpClient> =
            Arc::new(AllowListHttpClient::new(transport, manifest.clone()));
        let tokens = TokenManager::new(http.clone(), Arc::new(SystemClock::new()), env)
            .with_max_age(max_age);

        debug!(
            outgoing_domains = ?manifest.outgoing_domains,
            timeout_secs = settings.http_timeout.as_secs(),
            "runtime wired"
        );

        Ok(Self {
            manifest,
            report: WeeklyReport::new(Arc::new(tokens), http),
        })
    }

    /// The app manifest in effect.
    #[must_use]
    pub const fn manifest(&self) -> &AppManifest {
        &self.manifest
    }

    /// The weekly report use case.
    #[must_use]
    pub const fn report(&self) -> &WeeklyReport {
        &self.report
    }

    /// The shared token manager.
    #[must_use]
    pub fn tokens(&self) -> &TokenManager {
        self.report.tokens()
    }
}
