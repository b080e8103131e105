//! Links between configuration items.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::resource::{null_as_default, required, Resource};
use crate::error::OnixResult;

/// A directed link from a start item to an end item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Link {
    #[serde(deserialize_with = "null_as_default")]
    pub key: String,
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "null_as_default")]
    pub description: String,
    /// Key of the link type.
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub link_type: String,
    #[serde(skip_serializing_if = "Vec::is_empty", deserialize_with = "null_as_default")]
    pub tag: Vec<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty", deserialize_with = "null_as_default")]
    pub attribute: BTreeMap<String, Value>,
    #[serde(deserialize_with = "null_as_default")]
    pub start_item_key: String,
    #[serde(deserialize_with = "null_as_default")]
    pub end_item_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub changed_by: Option<String>,
}

impl Link {
    pub fn new(
        key: impl Into<String>,
        link_type: impl Into<String>,
        start_item_key: impl Into<String>,
        end_item_key: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            link_type: link_type.into(),
            start_item_key: start_item_key.into(),
            end_item_key: end_item_key.into(),
            ..Default::default()
        }
    }
}

impl Resource for Link {
    const KIND: &'static str = "link";

    fn segments(&self) -> OnixResult<Vec<&str>> {
        Ok(vec!["link", required(Self::KIND, "key", &self.key)?])
    }
}
