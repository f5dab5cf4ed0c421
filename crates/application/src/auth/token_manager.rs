//! OAuth2 client-credentials token manager.
//!
//! Hands out a currently valid bearer token, fetching a new one from the
//! Salesforce token endpoint when the cached credential is absent or expired.
//!
//! Refreshes are single-flight: callers that find the slot empty queue on a
//! guard, and whoever acquires it after a successful refresh reuses that
//! credential instead of requesting another one. The slot is cleared before
//! each refresh and written once, after the response has been decoded, so a
//! failed or dropped refresh leaves it empty.

use std::sync::Arc;

use chrono::Duration;
use serde::Deserialize;
use sf_report_domain::{AuthError, CachedCredential, HttpRequest, LifetimePolicy, RequestBody};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::token_store::{TokenStatus, TokenStore};
use crate::config::OAuthSettings;
use crate::ports::{Clock, EnvSource, HttpClient};

/// Successful response of the token endpoint.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    token_type: Option<String>,
    #[serde(default)]
    instance_url: Option<String>,
    #[serde(default, deserialize_with = "lenient_seconds")]
    expires_in: Option<u64>,
}

/// Reads `expires_in` as seconds, accepting integers, floats and numeric
/// strings. Anything else counts as absent.
fn lenient_seconds<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|value| match value {
        serde_json::Value::Number(n) => n.as_u64().or_else(|| float_seconds(n.as_f64())),
        serde_json::Value::String(s) => {
            let s = s.trim();
            s.parse::<u64>()
                .ok()
                .or_else(|| float_seconds(s.parse::<f64>().ok()))
        }
        _ => None,
    }))
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn float_seconds(value: Option<f64>) -> Option<u64> {
    value
        .filter(|v| v.is_finite() && *v >= 0.0 && *v < 1.0e15)
        .map(|v| v as u64)
}

/// Owns the cached credential and refreshes it on demand.
pub struct TokenManager {
    store: TokenStore,
    refresh_guard: Mutex<()>,
    http_client: Arc<dyn HttpClient>,
    clock: Arc<dyn Clock>,
    env: Arc<dyn EnvSource>,
    lifetime: LifetimePolicy,
}

impl TokenManager {
    /// Creates a manager with an empty slot and default policies.
    #[must_use]
    pub fn new(
        http_client: Arc<dyn HttpClient>,
        clock: Arc<dyn Clock>,
        env: Arc<dyn EnvSource>,
    ) -> Self {
        Self {
            store: TokenStore::new(),
            refresh_guard: Mutex::new(()),
            http_client,
            clock,
            env,
            lifetime: LifetimePolicy::default(),
        }
    }

    /// Sets how long refreshed tokens are considered valid.
    #[must_use]
    pub const fn with_lifetime_policy(mut self, lifetime: LifetimePolicy) -> Self {
        self.lifetime = lifetime;
        self
    }

    /// Sets the maximum age of the stored entry.
    #[must_use]
    pub fn with_max_age(mut self, max_age: Duration) -> Self {
        self.store = TokenStore::with_max_age(max_age);
        self
    }

    /// Returns a valid access token, refreshing first if needed.
    ///
    /// # Errors
    ///
    /// Propagates the error of a failed refresh.
    pub async fn get_token(&self) -> Result<Option<String>, AuthError> {
        Ok(self.valid_credential().await?.map(|credential| credential.token))
    }

    /// Returns the valid credential, refreshing first if needed.
    ///
    /// # Errors
    ///
    /// Propagates the error of a failed refresh, and returns
    /// `AuthError::TokenUnavailable` if the refreshed credential is already
    /// expired.
    pub async fn credential(&self) -> Result<CachedCredential, AuthError> {
        self.valid_credential()
            .await?
            .ok_or(AuthError::TokenUnavailable)
    }

    /// Refreshes the credential if it is absent or expired.
    ///
    /// # Errors
    ///
    /// Propagates the error of a failed refresh.
    pub async fn ensure_valid(&self) -> Result<(), AuthError> {
        self.valid_credential().await.map(|_| ())
    }

    /// The credential that was validated or stored by this call, so callers
    /// never re-read a slot another task may have cleared meanwhile.
    async fn valid_credential(&self) -> Result<Option<CachedCredential>, AuthError> {
        if let Some(credential) = self.store.get_valid(self.clock.now()).await {
            return Ok(Some(credential));
        }

        let _guard = self.refresh_guard.lock().await;
        if let Some(credential) = self.store.get_valid(self.clock.now()).await {
            debug!("access token refreshed by a concurrent caller");
            return Ok(Some(credential));
        }

        let credential = self.refresh_locked().await?;
        let now = self.clock.now();
        Ok(Some(credential).filter(|c| !c.is_expired_at(now)))
    }

    /// Unconditionally fetches a new token and stores it.
    ///
    /// # Errors
    ///
    /// - `AuthError::Configuration` if credentials are missing; no request is sent.
    /// - `AuthError::TokenFetch` if the endpoint answers with a non-2xx status.
    /// - `AuthError::Network` if the request fails in transport.
    /// - `AuthError::InvalidResponse` if the body carries no access token.
    pub async fn refresh(&self) -> Result<CachedCredential, AuthError> {
        let _guard = self.refresh_guard.lock().await;
        self.refresh_locked().await
    }

    /// Drops the cached credential so the next call refreshes.
    pub async fn invalidate(&self) {
        self.store.clear().await;
    }

    /// Status of the cached credential.
    pub async fn status(&self) -> TokenStatus {
        self.store.status(self.clock.now()).await
    }

    /// The cached credential, if it is still valid.
    pub async fn cached_credential(&self) -> Option<CachedCredential> {
        self.store.get_valid(self.clock.now()).await
    }

    async fn refresh_locked(&self) -> Result<CachedCredential, AuthError> {
        self.store.clear().await;

        let settings = OAuthSettings::from_env(self.env.as_ref())?;
        let token_url = settings.token_url();
        info!(%token_url, "fetching new access token");

        let request =
            HttpRequest::post(&token_url).body(RequestBody::form(settings.grant_form()));
        let response = self
            .http_client
            .execute(request)
            .await
            .map_err(|e| AuthError::Network {
                message: e.to_string(),
            })?;

        if !response.is_success() {
            let error = AuthError::TokenFetch {
                status: response.status.as_u16(),
                reason: response.status.reason_phrase().to_string(),
                body: response.body,
            };
            warn!(%error, "token refresh failed");
            return Err(error);
        }

        let token_response: TokenResponse =
            response.json_body().map_err(|e| AuthError::InvalidResponse {
                message: format!("Failed to parse token response: {e}"),
            })?;
        let access_token = token_response
            .access_token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AuthError::InvalidResponse {
                message: "response has no access_token".to_string(),
            })?;

        let now = self.clock.now();
        let lifetime = self.lifetime.lifetime(token_response.expires_in);
        let credential = CachedCredential::new(access_token, now, lifetime)
            .with_token_type(
                token_response
                    .token_type
                    .unwrap_or_else(|| "Bearer".to_string()),
            )
            .with_instance_url(token_response.instance_url);
        self.store.store(credential.clone(), now).await;

        info!(
            token = %credential.preview(),
            expires_at = %credential.expires_at,
            expires_at_ms = credential.expires_at_millis(),
            "access token refreshed"
        );
        Ok(credential)
    }
}
