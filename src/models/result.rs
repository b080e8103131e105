//! The envelope returned by PUT and DELETE resources.

use serde::{Deserialize, Serialize};

use super::resource::null_as_default;

const UNKNOWN_FAILURE: &str = "the service reported an error without a message";

/// Outcome of a mutating call.
///
/// An error-flagged result always carries a non-empty `message`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpResult {
    /// Whether the call changed any state on the server.
    #[serde(deserialize_with = "null_as_default")]
    pub changed: bool,
    /// Whether the call failed.
    #[serde(deserialize_with = "null_as_default")]
    pub error: bool,
    /// Human readable outcome.
    #[serde(deserialize_with = "null_as_default")]
    pub message: String,
    /// Operation code reported by the service (`I`nsert, `U`pdate, `D`elete, `L`ocked, `N`one).
    #[serde(deserialize_with = "null_as_default")]
    pub operation: String,
    /// Reference of the affected resource.
    #[serde(rename = "ref", deserialize_with = "null_as_default")]
    pub reference: String,
}

impl OpResult {
    /// A synthetic error result, used when nothing could be decoded.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            error: true,
            message: message.into(),
            ..Default::default()
        }
        .normalize()
    }

    /// Marks the result as failed, keeping any message the server sent and
    /// falling back to `message` otherwise.
    pub(crate) fn into_failure(mut self, message: impl Into<String>) -> Self {
        self.error = true;
        if self.message.trim().is_empty() {
            self.message = message.into();
        }
        self.normalize()
    }

    /// Enforces that an error result carries a message.
    pub(crate) fn normalize(mut self) -> Self {
        if self.error && self.message.trim().is_empty() {
            self.message = UNKNOWN_FAILURE.to_string();
        }
        self
    }

    /// Whether the service inserted a new resource.
    pub fn is_insert(&self) -> bool {
        self.operation == "I"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_service_envelope() {
        let json = r#"{"changed":true,"error":false,"operation":"I","ref":"test_model"}"#;
        let result: OpResult = serde_json::from_str(json).unwrap();
        assert!(result.changed);
        assert!(!result.error);
        assert!(result.message.is_empty());
        assert!(result.is_insert());
        assert_eq!(result.reference, "test_model");
    }

    #[test]
    fn null_fields_decode_as_defaults() {
        let json = r#"{"changed":true,"error":false,"message":null,"operation":"I","ref":"m"}"#;
        let result: OpResult = serde_json::from_str(json).unwrap();
        assert!(result.changed);
        assert!(result.message.is_empty());
        assert_eq!(result.reference, "m");

        let all_null: OpResult = serde_json::from_str(
            r#"{"changed":null,"error":null,"message":null,"operation":null,"ref":null}"#,
        )
        .unwrap();
        assert_eq!(all_null, OpResult::default());
    }

    #[test]
    fn error_flag_always_has_message() {
        let decoded: OpResult = serde_json::from_str(r#"{"error":true}"#).unwrap();
        assert_eq!(decoded.normalize().message, UNKNOWN_FAILURE);

        assert_eq!(OpResult::failure("").message, UNKNOWN_FAILURE);
        assert_eq!(OpResult::failure("connection refused").message, "connection refused");
    }

    #[test]
    fn into_failure_keeps_server_message() {
        let from_server = OpResult {
            message: "model is locked".into(),
            ..Default::default()
        };
        let failed = from_server.into_failure("error: response returned status: 409 Conflict");
        assert!(failed.error);
        assert_eq!(failed.message, "model is locked");

        let empty = OpResult::default().into_failure("error: response returned status: 500");
        assert_eq!(empty.message, "error: response returned status: 500");
    }
}
