//! App manifest: identity, declared functions and the outbound allow-list

use serde::{Deserialize, Serialize};

use crate::function::FunctionDefinition;
use crate::report::weekly_report_definition;

/// Hosts the app may contact.
pub const DEFAULT_OUTGOING_DOMAINS: &[&str] =
    &["api.salesforce.com", "d7u000000i8qbuak.my.salesforce.com"];

/// Bot capability scopes granted to the app.
pub const DEFAULT_BOT_SCOPES: &[&str] = &["commands", "chat:write", "chat:write.public"];

/// Static app configuration enforced by the host platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppManifest {
    /// App name.
    pub name: String,
    /// App description.
    pub description: String,
    /// Path to the app icon.
    pub icon: String,
    /// Functions the app exposes.
    #[serde(default)]
    pub functions: Vec<FunctionDefinition>,
    /// Workflows the app exposes.
    #[serde(default)]
    pub workflows: Vec<String>,
    /// Hosts outbound requests may target.
    #[serde(default)]
    pub outgoing_domains: Vec<String>,
    /// Granted bot scopes.
    #[serde(default)]
    pub bot_scopes: Vec<String>,
}

impl AppManifest {
    /// Returns true if `host` is on the outgoing allow-list.
    ///
    /// Matching is exact and case-insensitive; subdomains are not implied.
    #[must_use]
    pub fn allows_host(&self, host: &str) -> bool {
        let host = host.trim_end_matches('.');
        self.outgoing_domains
            .iter()
            .any(|domain| domain.eq_ignore_ascii_case(host))
    }

    /// Adds a host to the allow-list.
    #[must_use]
    pub fn with_outgoing_domain(mut self, domain: impl Into<String>) -> Self {
        self.outgoing_domains.push(domain.into());
        self
    }
}

impl Default for AppManifest {
    fn default() -> Self {
        Self {
            name: "Weekly Report".to_string(),
            description: "Summarize and format Salesforce data with EinsteinAI".to_string(),
            icon: "assets/default_new_app_icon.png".to_string(),
            functions: vec![weekly_report_definition()],
            workflows: Vec::new(),
            outgoing_domains: DEFAULT_OUTGOING_DOMAINS
                .iter()
                .map(ToString::to_string)
                .collect(),
            bot_scopes: DEFAULT_BOT_SCOPES.iter().map(ToString::to_string).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_allow_list() {
        let manifest = AppManifest::default();

        assert!(manifest.allows_host("api.salesforce.com"));
        assert!(manifest.allows_host("API.Salesforce.com"));
        assert!(manifest.allows_host("d7u000000i8qbuak.my.salesforce.com."));
        assert!(!manifest.allows_host("evil.example.com"));
        assert!(!manifest.allows_host("x.api.salesforce.com"));
        assert!(!manifest.allows_host(""));
    }

    #[test]
    fn test_manifest_json_shape() {
        let value = serde_json::to_value(AppManifest::default()).unwrap_or_default();

        assert_eq!(
            value["outgoingDomains"],
            serde_json::json!(["api.salesforce.com", "d7u000000i8qbuak.my.salesforce.com"])
        );
        assert_eq!(
            value["botScopes"],
            serde_json::json!(["commands", "chat:write", "chat:write.public"])
        );
        assert_eq!(value["functions"][0]["callback_id"], "weekly_report");
    }

    #[test]
    fn test_with_outgoing_domain() {
        let manifest = AppManifest::default().with_outgoing_domain("127.0.0.1");
        assert!(manifest.allows_host("127.0.0.1"));
        assert_eq!(manifest.functions.len(), 1);
        assert_eq!(manifest.functions[0].callback_id, "weekly_report");
    }
}
