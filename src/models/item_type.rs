//! Item types describe the shape of configuration items.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::resource::{is_false, null_as_default, required, Resource};
use crate::error::OnixResult;

/// The type of a configuration item, owned by a model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ItemType {
    #[serde(deserialize_with = "null_as_default")]
    pub key: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "null_as_default")]
    pub description: String,
    /// Filter definitions applied when querying items of this type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<Value>,
    /// JSON schema the `meta` field of items must satisfy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta_schema: Option<Value>,
    /// Key of the owning model.
    #[serde(deserialize_with = "null_as_default")]
    pub model_key: String,
    /// Whether changes to items of this type are published to the event feed.
    #[serde(skip_serializing_if = "is_false", deserialize_with = "null_as_default")]
    pub notify_change: bool,
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

impl ItemType {
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

impl Resource for ItemType {
    const KIND: &'static str = "item type";

    fn segments(&self) -> OnixResult<Vec<&str>> {
        Ok(vec!["itemtype", required(Self::KIND, "key", &self.key)?])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn uses_service_field_names() {
        let mut item_type = ItemType::new("test_item_type", "Test Item Type", "test_model");
        item_type.encrypt_txt = true;
        item_type.notify_change = true;
        item_type.meta_schema = Some(json!({"type": "object"}));

        let value = serde_json::to_value(&item_type).unwrap();
        assert_eq!(value["modelKey"], "test_model");
        assert_eq!(value["encryptTxt"], true);
        assert_eq!(value["notifyChange"], true);
        assert_eq!(value["metaSchema"]["type"], "object");
        assert!(value.get("encryptMeta").is_none());

        let back: ItemType = serde_json::from_value(value).unwrap();
        assert_eq!(back, item_type);
    }
}
