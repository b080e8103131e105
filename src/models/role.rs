//! Roles group privileges and are granted to users.

use serde::{Deserialize, Serialize};

use super::resource::{null_as_default, required, Resource};
use crate::error::OnixResult;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Role {
    #[serde(deserialize_with = "null_as_default")]
    pub key: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "null_as_default")]
    pub owner: String,
    /// Access level: 0 for regular roles, higher values for administrative ones.
    #[serde(deserialize_with = "null_as_default")]
    pub level: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub changed_by: Option<String>,
}

impl Resource for Role {
    const KIND: &'static str = "role";

    fn segments(&self) -> OnixResult<Vec<&str>> {
        Ok(vec!["role", required(Self::KIND, "key", &self.key)?])
    }
}
