//! Credential and authentication error types

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lifetime assumed for a freshly issued token when the server gives none.
pub const DEFAULT_TOKEN_LIFETIME_SECS: i64 = 30 * 60;

/// How long a refreshed token is considered valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "seconds", rename_all = "snake_case")]
pub enum LifetimePolicy {
    /// Always use this many seconds, ignoring the server's `expires_in`.
    Fixed(i64),
    /// Use the server's `expires_in` when present, otherwise this many seconds.
    ServerOrFixed(i64),
}

impl LifetimePolicy {
    /// Resolves the lifetime for a token the server issued with `expires_in`.
    ///
    /// Values chrono cannot represent fall back to the configured seconds,
    /// then to [`DEFAULT_TOKEN_LIFETIME_SECS`].
    #[must_use]
    pub fn lifetime(self, expires_in: Option<u64>) -> Duration {
        let fixed = match self {
            Self::Fixed(secs) | Self::ServerOrFixed(secs) => secs,
        };
        let fallback = Duration::try_seconds(fixed).unwrap_or_else(default_lifetime);
        match self {
            Self::Fixed(_) => fallback,
            Self::ServerOrFixed(_) => expires_in
                .and_then(|s| i64::try_from(s).ok())
                .and_then(Duration::try_seconds)
                .unwrap_or(fallback),
        }
    }
}

fn default_lifetime() -> Duration {
    Duration::seconds(DEFAULT_TOKEN_LIFETIME_SECS)
}

impl Default for LifetimePolicy {
    fn default() -> Self {
        Self::ServerOrFixed(DEFAULT_TOKEN_LIFETIME_SECS)
    }
}

/// An access token held by the token manager together with its expiry.
///
/// A credential cannot exist without an expiry; the token must not be used
/// after `expires_at`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedCredential {
    /// Opaque bearer token.
    pub token: String,
    /// Token type reported by the server (usually "Bearer").
    pub token_type: String,
    /// Instant after which the token is stale.
    pub expires_at: DateTime<Utc>,
    /// When the token was obtained.
    pub obtained_at: DateTime<Utc>,
    /// Instance URL returned alongside the token, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance_url: Option<String>,
}

impl CachedCredential {
    /// Creates a credential obtained at `now` and valid for `lifetime`.
    ///
    /// An expiry past the representable range is replaced by the default
    /// lifetime.
    #[must_use]
    pub fn new(token: impl Into<String>, now: DateTime<Utc>, lifetime: Duration) -> Self {
        let expires_at = now
            .checked_add_signed(lifetime)
            .or_else(|| now.checked_add_signed(default_lifetime()))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        Self {
            token: token.into(),
            token_type: "Bearer".to_string(),
            expires_at,
            obtained_at: now,
            instance_url: None,
        }
    }

    /// Sets the token type.
    #[must_use]
    pub fn with_token_type(mut self, token_type: impl Into<String>) -> Self {
        self.token_type = token_type.into();
        self
    }

    /// Sets the instance URL.
    #[must_use]
    pub fn with_instance_url(mut self, instance_url: Option<String>) -> Self {
        self.instance_url = instance_url;
        self
    }

    /// Returns true once `now` has passed the expiry.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    /// Seconds remaining until expiry, negative once expired.
    #[must_use]
    pub fn seconds_until_expiry(&self, now: DateTime<Utc>) -> i64 {
        (self.expires_at - now).num_seconds()
    }

    /// Expiry as milliseconds since the Unix epoch.
    #[must_use]
    pub fn expires_at_millis(&self) -> i64 {
        self.expires_at.timestamp_millis()
    }

    /// Returns the `Authorization` header value for this token.
    #[must_use]
    pub fn authorization_header(&self) -> String {
        format!("{} {}", self.token_type, self.token)
    }

    /// Short preview of the token that is safe to log.
    #[must_use]
    pub fn preview(&self) -> String {
        token_preview(&self.token)
    }
}

/// Get a preview of an access token (first 8 chars + ...).
#[must_use]
pub fn token_preview(token: &str) -> String {
    if token.chars().count() > 12 {
        let cut = token
            .char_indices()
            .nth(8)
            .map_or(token.len(), |(index, _)| index);
        format!("{}...", &token[..cut])
    } else {
        token.to_string()
    }
}

/// Authentication errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// A required credential or setting is missing.
    #[error("configuration error: {message}")]
    Configuration {
        /// What is missing.
        message: String,
    },

    /// The OAuth endpoint answered with a non-success status.
    #[error("failed to fetch new access token: {status} {reason}. Response: {body}")]
    TokenFetch {
        /// HTTP status code.
        status: u16,
        /// Reason phrase for the status.
        reason: String,
        /// Response body, kept for diagnostics.
        body: String,
    },

    /// The token request could not be sent or its response not read.
    #[error("network error: {message}")]
    Network {
        /// Error description.
        message: String,
    },

    /// The OAuth endpoint answered 2xx with an unusable body.
    #[error("invalid token response: {message}")]
    InvalidResponse {
        /// Error description.
        message: String,
    },

    /// No valid token was available after ensuring validity.
    #[error("failed to retrieve Salesforce access token")]
    TokenUnavailable,
}

impl AuthError {
    /// Creates a configuration error.
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}
