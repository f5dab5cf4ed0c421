//! Settings read from the environment

use sf_report_domain::AuthError;

use crate::ports::EnvSource;

/// Base URL of the Salesforce org issuing tokens.
pub const SALESFORCE_ORG_URL: &str = "SALESFORCE_ORG_URL";
/// OAuth client id.
pub const CLIENT_ID: &str = "CLIENT_ID";
/// OAuth client secret.
pub const CLIENT_SECRET: &str = "CLIENT_SECRET";
/// Summarization endpoint URL.
pub const SALESFORCE_API_URL: &str = "SALESFORCE_API_URL";

/// Path of the token endpoint below the org URL.
pub const TOKEN_PATH: &str = "/services/oauth2/token";

/// Client-credentials settings for the token endpoint.
#[derive(Clone, PartialEq, Eq)]
pub struct OAuthSettings {
    /// Org base URL without trailing slash.
    pub org_url: String,
    /// OAuth client id.
    pub client_id: String,
    /// OAuth client secret.
    pub client_secret: String,
}

impl OAuthSettings {
    /// Reads the settings from `env`.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Configuration` if the client id, client secret
    /// or org URL is missing or blank.
    pub fn from_env(env: &dyn EnvSource) -> Result<Self, AuthError> {
        let (Some(client_id), Some(client_secret)) =
            (env.non_empty(CLIENT_ID), env.non_empty(CLIENT_SECRET))
        else {
            return Err(AuthError::configuration(
                "CLIENT_ID or CLIENT_SECRET is not set in environment variables.",
            ));
        };

        let org_url = env.non_empty(SALESFORCE_ORG_URL).ok_or_else(|| {
            AuthError::configuration("SALESFORCE_ORG_URL is not set in environment variables.")
        })?;

        Ok(Self {
            org_url: org_url.trim_end_matches('/').to_string(),
            client_id,
            client_secret,
        })
    }

    /// Full URL of the token endpoint.
    #[must_use]
    pub fn token_url(&self) -> String {
        format!("{}{TOKEN_PATH}", self.org_url)
    }

    /// Form fields of the client-credentials grant.
    #[must_use]
    pub fn grant_form(&self) -> [(&'static str, String); 3] {
        [
            ("grant_type", "client_credentials".to_string()),
            ("client_id", self.client_id.clone()),
            ("client_secret", self.client_secret.clone()),
        ]
    }
}

impl std::fmt::Debug for OAuthSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuthSettings")
            .field("org_url", &self.org_url)
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

/// Reads the summarization endpoint URL.
#[must_use]
pub fn summary_api_url(env: &dyn EnvSource) -> Option<String> {
    env.non_empty(SALESFORCE_API_URL)
}
