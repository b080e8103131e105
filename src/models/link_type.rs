//! Link types.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::resource::{is_false, null_as_default, required, Resource};
use crate::error::OnixResult;

/// The type of a link between two items.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LinkType {
    #[serde(deserialize_with = "null_as_default")]
    pub key: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta_schema: Option<Value>,
    #[serde(deserialize_with = "null_as_default")]
    pub model_key: String,
    #[serde(skip_serializing_if = "Vec::is_empty", deserialize_with = "null_as_default")]
    pub tag: Vec<Value>,
    #[serde(skip_serializing_if = "is_false", deserialize_with = "null_as_default")]
    pub encrypt_meta: bool,
    #[serde(skip_serializing_if = "is_false", deserialize_with = "null_as_default")]
    pub encrypt_txt: bool,
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

impl LinkType {
    pub fn new(
        key: impl Into<String>,
        name: impl Into<String>,
        model_key: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            model_key: model_key.into(),
            ..Default::default()
        }
    }
}

impl Resource for LinkType {
    const KIND: &'static str = "link type";

    fn segments(&self) -> OnixResult<Vec<&str>> {
        Ok(vec!["linktype", required(Self::KIND, "key", &self.key)?])
    }
}
