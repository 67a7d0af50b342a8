//! Declarative tool schemas.
//!
//! A [`ToolDescriptor`] names a tool and lists its [`ParamSpec`]s. The same
//! descriptor drives three things:
//! - the discovery listing (serialized as-is),
//! - the JSON Schema advertised over MCP (`input_schema()`),
//! - argument validation before a handler runs (`validate()`).

use rmcp::model::JsonObject;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use super::error::ToolError;

// ============================================================================
// Parameter Specs
// ============================================================================

/// Primitive JSON type accepted by a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamKind {
    String,
    Number,
    Integer,
    Boolean,
    Object,
    Array,
}

impl ParamKind {
    /// JSON Schema type keyword for this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::Object => "object",
            Self::Array => "array",
        }
    }

    /// Check whether a JSON value conforms to this kind.
    pub fn accepts(self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::Number => value.is_number(),
            Self::Integer => value.is_i64() || value.is_u64(),
            Self::Boolean => value.is_boolean(),
            Self::Object => value.is_object(),
            Self::Array => value.is_array(),
        }
    }
}

/// Validation contract for one input field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamSpec {
    pub name: String,

    #[serde(rename = "type")]
    pub kind: ParamKind,

    pub description: String,

    pub required: bool,

    /// Value substituted when an optional parameter is omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

impl ParamSpec {
    /// Create an optional parameter of the given kind.
    pub fn new(name: impl Into<String>, kind: ParamKind, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            description: description.into(),
            required: false,
            default: None,
        }
    }

    /// Shorthand for an optional string parameter.
    pub fn string(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(name, ParamKind::String, description)
    }

    /// Mark the parameter as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Attach a default value.
    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }
}

// ============================================================================
// Tool Descriptor
// ============================================================================

/// Declarative metadata describing a tool for discovery and validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    pub parameters: Vec<ParamSpec>,
}

impl ToolDescriptor {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters: Vec::new(),
        }
    }

    /// Append a parameter; declaration order is preserved.
    pub fn param(mut self, spec: ParamSpec) -> Self {
        self.parameters.push(spec);
        self
    }

    /// Build the JSON Schema object advertised as the tool's input schema.
    pub fn input_schema(&self) -> JsonObject {
        let mut properties = Map::new();
        let mut required = Vec::new();

        for spec in &self.parameters {
            let mut property = Map::new();
            property.insert("type".into(), json!(spec.kind.as_str()));
            property.insert("description".into(), json!(spec.description));
            if let Some(default) = &spec.default {
                property.insert("default".into(), default.clone());
            }
            properties.insert(spec.name.clone(), Value::Object(property));

            if spec.required {
                required.push(Value::String(spec.name.clone()));
            }
        }

        let mut schema = Map::new();
        schema.insert("type".into(), json!("object"));
        schema.insert("properties".into(), Value::Object(properties));
        if !required.is_empty() {
            schema.insert("required".into(), Value::Array(required));
        }
        schema
    }

    /// Validate raw arguments against the declared parameters.
    ///
    /// `null` is treated as an empty object. Undeclared keys are dropped,
    /// and defaults fill in omitted optional parameters.
    pub fn validate(&self, arguments: Value) -> Result<ValidatedParams, ToolError> {
        let mut raw = match arguments {
            Value::Null => Map::new(),
            Value::Object(map) => map,
            other => {
                return Err(ToolError::invalid_arguments(format!(
                    "Arguments for '{}' must be a JSON object, got {}",
                    self.name,
                    json_type_name(&other)
                )));
            }
        };

        let mut validated = Map::new();
        for spec in &self.parameters {
            match raw.remove(&spec.name) {
                Some(Value::Null) | None => {
                    if spec.required {
                        return Err(ToolError::invalid_arguments(format!(
                            "Missing required parameter: {}",
                            spec.name
                        )));
                    }
                    if let Some(default) = &spec.default {
                        validated.insert(spec.name.clone(), default.clone());
                    }
                }
                Some(value) => {
                    if !spec.kind.accepts(&value) {
                        return Err(ToolError::invalid_arguments(format!(
                            "Parameter '{}' must be of type {}, got {}",
                            spec.name,
                            spec.kind.as_str(),
                            json_type_name(&value)
                        )));
                    }
                    validated.insert(spec.name.clone(), value);
                }
            }
        }

        Ok(ValidatedParams(validated))
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ============================================================================
// Validated Parameters
// ============================================================================

/// Parameter mapping that has passed descriptor validation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidatedParams(Map<String, Value>);

impl ValidatedParams {
    /// Get a string parameter, if present.
    pub fn str(&self, name: &str) -> Option<&str> {
        self.0.get(name).and_then(Value::as_str)
    }

    /// Get a string parameter that validation guarantees to be present.
    pub fn require_str(&self, name: &str) -> Result<&str, ToolError> {
        self.str(name)
            .ok_or_else(|| ToolError::invalid_arguments(format!("Missing required parameter: {}", name)))
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}
