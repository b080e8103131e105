//! Rules constraining which item types a link type may connect.

use serde::{Deserialize, Serialize};

use super::resource::{null_as_default, required, Resource};
use crate::error::OnixResult;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LinkRule {
    #[serde(deserialize_with = "null_as_default")]
    pub key: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub link_type_key: String,
    #[serde(deserialize_with = "null_as_default")]
    pub start_item_type_key: String,
    #[serde(deserialize_with = "null_as_default")]
    pub end_item_type_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub changed_by: Option<String>,
}

impl Resource for LinkRule {
    const KIND: &'static str = "link rule";

    fn segments(&self) -> OnixResult<Vec<&str>> {
        Ok(vec!["linkrule", required(Self::KIND, "key", &self.key)?])
    }
}
