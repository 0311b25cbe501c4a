//! Structural argument validation against a [`ToolDescriptor`].
//!
//! Checks presence of required parameters, primitive types and enumerated
//! values. Nothing here looks at what a value means: an empty query string
//! is a valid string.

use rmcp::model::JsonObject;
use serde_json::Value;
use thiserror::Error;

use super::descriptor::{ParamType, ToolDescriptor};

/// The first problem found in an argument bundle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationFailure {
    #[error("Arguments must be a JSON object")]
    NotAnObject,

    #[error("Missing required parameter '{name}' (expected {expected})")]
    MissingRequired {
        name: &'static str,
        expected: ParamType,
    },

    #[error("Parameter '{name}' must be a {expected}")]
    WrongType {
        name: &'static str,
        expected: ParamType,
    },

    #[error("Parameter '{name}' must be one of: {}", .allowed.join(", "))]
    NotAllowed {
        name: &'static str,
        allowed: &'static [&'static str],
    },
}

/// Turn the raw `arguments` field of a call into an object.
///
/// Absent arguments are treated as an empty object.
pub fn arguments_object(arguments: Option<Value>) -> Result<JsonObject, ValidationFailure> {
    match arguments {
        None | Some(Value::Null) => Ok(JsonObject::new()),
        Some(Value::Object(map)) => Ok(map),
        Some(_) => Err(ValidationFailure::NotAnObject),
    }
}

/// Validate `arguments` against the descriptor's schema.
///
/// Required parameters are checked first, then every declared parameter in
/// declaration order. A `null` value counts as absent.
pub fn validate(
    descriptor: &ToolDescriptor,
    arguments: &JsonObject,
) -> Result<(), ValidationFailure> {
    let schema = &descriptor.input_schema;

    for spec in schema.params() {
        let required = schema.required_names().contains(&spec.name);
        if required && present(arguments, spec.name).is_none() {
            return Err(ValidationFailure::MissingRequired {
                name: spec.name,
                expected: spec.param_type,
            });
        }
    }

    for spec in schema.params() {
        let Some(value) = present(arguments, spec.name) else {
            continue;
        };

        if !spec.param_type.matches(value) {
            return Err(ValidationFailure::WrongType {
                name: spec.name,
                expected: spec.param_type,
            });
        }

        if let Some(allowed) = spec.allowed_values {
            let member = value
                .as_str()
                .is_some_and(|v| allowed.iter().any(|a| *a == v));
            if !member {
                return Err(ValidationFailure::NotAllowed {
                    name: spec.name,
                    allowed,
                });
            }
        }
    }

    Ok(())
}

fn present<'a>(arguments: &'a JsonObject, name: &str) -> Option<&'a Value> {
    arguments.get(name).filter(|v| !v.is_null())
}
