//! Privileges grant a role rights over a partition.

use serde::{Deserialize, Serialize};

use super::resource::{null_as_default, required, Resource};
use crate::error::OnixResult;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Privilege {
    #[serde(deserialize_with = "null_as_default")]
    pub key: String,
    #[serde(deserialize_with = "null_as_default")]
    pub role_key: String,
    #[serde(deserialize_with = "null_as_default")]
    pub partition_key: String,
    #[serde(deserialize_with = "null_as_default")]
    pub can_create: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub can_read: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub can_delete: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub changed_by: Option<String>,
}

impl Resource for Privilege {
    const KIND: &'static str = "privilege";

    fn segments(&self) -> OnixResult<Vec<&str>> {
        Ok(vec!["privilege", required(Self::KIND, "key", &self.key)?])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rights_are_always_sent() {
        let privilege = Privilege {
            key: "ADMIN-REF".into(),
            role_key: "ADMIN".into(),
            partition_key: "REF".into(),
            can_read: true,
            ..Default::default()
        };
        let value = serde_json::to_value(&privilege).unwrap();
        assert_eq!(value["roleKey"], "ADMIN");
        assert_eq!(value["partitionKey"], "REF");
        assert_eq!(value["canCreate"], false);
        assert_eq!(value["canRead"], true);
        assert_eq!(value["canDelete"], false);
    }
}
