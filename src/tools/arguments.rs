//! Typed access to tool call arguments.

use crate::error::MentorError;

/// Wrapper around tool call arguments providing typed extraction.
#[derive(Debug, Clone)]
pub struct ToolArguments {
    value: serde_json::Value,
}

impl ToolArguments {
    /// Wrap raw arguments. Providers that hand back the arguments as a JSON
    /// string are decoded here; undecodable strings are kept verbatim.
    pub fn new(value: serde_json::Value) -> Self {
        let value = match value {
            serde_json::Value::String(raw) if raw.trim().is_empty() => serde_json::json!({}),
            serde_json::Value::String(raw) => {
                serde_json::from_str(raw.trim()).unwrap_or(serde_json::Value::String(raw))
            }
            other => other,
        };
        Self { value }
    }

    /// Get the raw JSON value.
    pub fn raw(&self) -> &serde_json::Value {
        &self.value
    }

    /// Get a string argument by key.
    ///
    /// Scalars are accepted and rendered as text, since every tool takes
    /// string parameters and models occasionally send `"exam_type": 1`.
    pub fn get_str(&self, key: &str) -> Result<String, MentorError> {
        match self.value.get(key) {
            Some(serde_json::Value::String(s)) => Ok(s.clone()),
            Some(v @ (serde_json::Value::Number(_) | serde_json::Value::Bool(_))) => {
                Ok(v.to_string())
            }
            _ => Err(MentorError::InvalidArgument(format!(
                "Missing string argument: {key}"
            ))),
        }
    }
}
