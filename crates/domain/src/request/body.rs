//! HTTP Request body types

use serde::{Deserialize, Serialize};

/// Content-Type for form-urlencoded data.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Content-Type for JSON data.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Body of an outbound request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "type", content = "content", rename_all = "snake_case")]
pub enum RequestBody {
    /// No body
    #[default]
    None,
    /// JSON document
    Json(serde_json::Value),
    /// Ordered form fields, sent URL-encoded
    Form(Vec<(String, String)>),
}

impl RequestBody {
    /// Creates a form body from key/value pairs.
    #[must_use]
    pub fn form<K, V>(fields: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self::Form(
            fields
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Returns the Content-Type implied by the body, if any.
    #[must_use]
    pub const fn content_type(&self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Json(_) => Some(JSON_CONTENT_TYPE),
            Self::Form(_) => Some(FORM_CONTENT_TYPE),
        }
    }

    /// Looks up a form field by name.
    #[must_use]
    pub fn form_value(&self, name: &str) -> Option<&str> {
        match self {
            Self::Form(fields) => fields
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.as_str()),
            _ => None,
        }
    }
}
