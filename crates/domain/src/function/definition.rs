//! Workflow function definitions and their parameter schemas

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Type of a function parameter as declared to the host platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ParameterType {
    /// UTF-8 text
    #[default]
    String,
}

impl ParameterType {
    /// Returns the type name used in schemas.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
        }
    }

    /// Returns true if `value` is acceptable for this type.
    #[must_use]
    pub fn accepts(self, value: &serde_json::Value) -> bool {
        match self {
            Self::String => value.is_string(),
        }
    }
}

impl fmt::Display for ParameterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single declared parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterSpec {
    /// Parameter type.
    #[serde(rename = "type")]
    pub kind: ParameterType,
    /// Human-readable description.
    pub description: String,
}

impl ParameterSpec {
    /// Creates a string parameter.
    #[must_use]
    pub fn string(description: impl Into<String>) -> Self {
        Self {
            kind: ParameterType::String,
            description: description.into(),
        }
    }
}

/// Declared input or output parameters of a function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ParameterSchema {
    /// Parameters by name.
    pub properties: BTreeMap<String, ParameterSpec>,
    /// Names of parameters that must be present.
    #[serde(default)]
    pub required: Vec<String>,
}

impl ParameterSchema {
    /// Adds an optional parameter.
    #[must_use]
    pub fn property(mut self, name: impl Into<String>, spec: ParameterSpec) -> Self {
        self.properties.insert(name.into(), spec);
        self
    }

    /// Checks a JSON object of values against this schema.
    ///
    /// `null` values count as absent.
    ///
    /// # Errors
    ///
    /// Returns a `DomainError` describing the first violation found.
    pub fn validate(&self, values: &serde_json::Value) -> DomainResult<()> {
        let object = values.as_object().ok_or(DomainError::InvalidInputs)?;

        for (name, value) in object {
            let spec = self
                .properties
                .get(name)
                .ok_or_else(|| DomainError::UnknownParameter(name.clone()))?;
            if !value.is_null() && !spec.kind.accepts(value) {
                return Err(DomainError::InvalidParameterType {
                    name: name.clone(),
                    expected: spec.kind.to_string(),
                });
            }
        }

        for name in &self.required {
            if object.get(name).is_none_or(serde_json::Value::is_null) {
                return Err(DomainError::MissingParameter(name.clone()));
            }
        }

        Ok(())
    }
}

/// A function the host platform can invoke from a workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionDefinition {
    /// Stable identifier of the function.
    pub callback_id: String,
    /// Display title.
    pub title: String,
    /// Display description.
    pub description: String,
    /// Source file implementing the function.
    pub source_file: String,
    /// Accepted inputs.
    pub input_parameters: ParameterSchema,
    /// Produced outputs.
    pub output_parameters: ParameterSchema,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn schema() -> ParameterSchema {
        let mut schema = ParameterSchema::default()
            .property("notes", ParameterSpec::string("free text"))
            .property("owner", ParameterSpec::string("record owner"));
        schema.required.push("owner".to_string());
        schema
    }

    #[test]
    fn test_validate_accepts_declared_inputs() {
        assert_eq!(schema().validate(&json!({ "owner": "ana" })), Ok(()));
        assert_eq!(
            schema().validate(&json!({ "owner": "ana", "notes": null })),
            Ok(())
        );
    }

    #[test]
    fn test_validate_rejects_violations() {
        assert_eq!(
            schema().validate(&json!({ "owner": "ana", "extra": 1 })),
            Err(DomainError::UnknownParameter("extra".to_string()))
        );
        assert_eq!(
            schema().validate(&json!({ "notes": "x" })),
            Err(DomainError::MissingParameter("owner".to_string()))
        );
        assert_eq!(
            schema().validate(&json!({ "owner": 5 })),
            Err(DomainError::InvalidParameterType {
                name: "owner".to_string(),
                expected: "string".to_string(),
            })
        );
        assert_eq!(
            schema().validate(&json!(["owner"])),
            Err(DomainError::InvalidInputs)
        );
    }

    #[test]
    fn test_parameter_spec_serializes_type_field() {
        let value = serde_json::to_value(ParameterSpec::string("d")).unwrap_or_default();
        assert_eq!(value, json!({ "type": "string", "description": "d" }));
    }
}
