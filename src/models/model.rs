//! Models: the top-level grouping of item and link types.

use serde::{Deserialize, Serialize};

use super::resource::{is_false, null_as_default, required, Resource};
use crate::error::OnixResult;

/// A model groups item types, link types and link rules.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Model {
    #[serde(deserialize_with = "null_as_default")]
    pub key: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "null_as_default")]
    pub partition: String,
    #[serde(skip_serializing_if = "is_false", deserialize_with = "null_as_default")]
    pub managed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub changed_by: Option<String>,
}

impl Model {
    pub fn new(key: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

impl Resource for Model {
    const KIND: &'static str = "model";

    fn segments(&self) -> OnixResult<Vec<&str>> {
        Ok(vec!["model", required(Self::KIND, "key", &self.key)?])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_only_populated_fields() {
        let model = Model::new("test_model", "Test Model");
        assert_eq!(
            serde_json::to_string(&model).unwrap(),
            r#"{"key":"test_model","name":"Test Model"}"#
        );
    }

    #[test]
    fn decodes_server_representation() {
        let json = r#"{
            "key": "test_model",
            "name": "Test Model",
            "description": "Test Model",
            "partition": "REF",
            "managed": true,
            "version": 3,
            "created": "2020-05-01T10:00:00Z",
            "updated": "2020-05-02T10:00:00Z",
            "changedBy": "admin"
        }"#;
        let model: Model = serde_json::from_str(json).unwrap();
        assert_eq!(model.partition, "REF");
        assert!(model.managed);
        assert_eq!(model.version, Some(3));
        assert_eq!(model.changed_by.as_deref(), Some("admin"));

        let again: Model = serde_json::from_slice(&serde_json::to_vec(&model).unwrap()).unwrap();
        assert_eq!(again, model);
    }

    #[test]
    fn path_requires_key() {
        assert_eq!(Model::new("m", "M").segments().unwrap(), vec!["model", "m"]);
        assert!(Model::default().validate().is_err());
    }
}
