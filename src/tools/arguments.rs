//! Typed access to tool call arguments.

use crate::error::ItineraError;

/// Wrapper around tool call arguments providing typed extraction.
#[derive(Debug, Clone)]
pub struct ToolArguments {
    value: serde_json::Value,
}

impl ToolArguments {
    pub fn new(value: serde_json::Value) -> Self {
        Self { value }
    }

    /// Get the raw JSON value.
    pub fn raw(&self) -> &serde_json::Value {
        &self.value
    }

    /// Get a string argument by key.
    pub fn get_str(&self, key: &str) -> Result<&str, ItineraError> {
        self.value
            .get(key)
            .and_then(|v| v.as_str())
            .ok_or_else(|| ItineraError::InvalidArgument(format!("Missing string argument: {key}")))
    }

    /// Get an optional string argument.
    pub fn get_str_opt(&self, key: &str) -> Option<&str> {
        self.value.get(key).and_then(|v| v.as_str())
    }

    /// Get an integer argument.
    pub fn get_i64(&self, key: &str) -> Result<i64, ItineraError> {
        self.value.get(key).and_then(|v| v.as_i64()).ok_or_else(|| {
            ItineraError::InvalidArgument(format!("Missing integer argument: {key}"))
        })
    }

    /// Get an optional float argument.
    pub fn get_f64_opt(&self, key: &str) -> Option<f64> {
        self.value.get(key).and_then(|v| v.as_f64())
    }

    /// Deserialize the entire arguments into a typed struct. Accepts both
    /// JSON values and JSON-encoded strings (the wire form).
    pub fn deserialize<T: serde::de::DeserializeOwned>(&self) -> Result<T, ItineraError> {
        let value = match &self.value {
            serde_json::Value::String(raw) => {
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    serde_json::json!({})
                } else {
                    serde_json::from_str::<serde_json::Value>(trimmed).map_err(|e| {
                        ItineraError::InvalidArgument(format!(
                            "Failed to deserialize arguments: {e}"
                        ))
                    })?
                }
            }
            other => other.clone(),
        };
        serde_json::from_value(value).map_err(|e| {
            ItineraError::InvalidArgument(format!("Failed to deserialize arguments: {e}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_getters() {
        let args = ToolArguments::new(serde_json::json!({
            "query": "맛집",
            "count": 5,
            "radius": 2.5
        }));
        assert_eq!(args.get_str("query").unwrap(), "맛집");
        assert_eq!(args.get_i64("count").unwrap(), 5);
        assert_eq!(args.get_f64_opt("radius"), Some(2.5));
        assert!(args.get_str("missing").is_err());
        assert!(args.get_i64("query").is_err());
        assert_eq!(args.get_str_opt("missing"), None);
    }

    #[test]
    fn deserialize_accepts_wire_string_form() {
        #[derive(serde::Deserialize, Debug, PartialEq)]
        struct Search {
            query: String,
            #[serde(default)]
            max_results: Option<u64>,
        }

        // arguments as a JSON value
        let args = ToolArguments::new(serde_json::json!({"query": "온천"}));
        let parsed: Search = args.deserialize().unwrap();
        assert_eq!(parsed.query, "온천");

        // arguments as a JSON-encoded string, the chat-completions wire form
        let args = ToolArguments::new(serde_json::Value::String(
            "{\"query\": \"쇼핑\", \"max_results\": 3}".into(),
        ));
        let parsed: Search = args.deserialize().unwrap();
        assert_eq!(parsed.query, "쇼핑");
        assert_eq!(parsed.max_results, Some(3));

        // empty string means no arguments
        let args = ToolArguments::new(serde_json::Value::String("  ".into()));
        assert!(args.deserialize::<Search>().is_err());
    }
}
