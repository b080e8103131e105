//! Configuration items.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::resource::{null_as_default, required, Resource};
use crate::error::OnixResult;

/// A configuration item, an instance of an item type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Item {
    #[serde(deserialize_with = "null_as_default")]
    pub key: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub status: i32,
    /// Key of the item type.
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub item_type: String,
    #[serde(skip_serializing_if = "Vec::is_empty", deserialize_with = "null_as_default")]
    pub tag: Vec<Value>,
    /// Free-form JSON, validated by the service against the item type's meta schema.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
    /// Free-form text configuration.
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "null_as_default")]
    pub txt: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty", deserialize_with = "null_as_default")]
    pub attribute: BTreeMap<String, Value>,
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "null_as_default")]
    pub partition: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated: Option<String>,
    /// Index of the key used to encrypt `meta`/`txt`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enc_key_ix: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub changed_by: Option<String>,
}

impl Item {
    pub fn new(
        key: impl Into<String>,
        name: impl Into<String>,
        item_type: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            item_type: item_type.into(),
            ..Default::default()
        }
    }

    /// Set an attribute value.
    pub fn attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attribute.insert(key.into(), value.into());
        self
    }
}

impl Resource for Item {
    const KIND: &'static str = "item";

    fn segments(&self) -> OnixResult<Vec<&str>> {
        Ok(vec!["item", required(Self::KIND, "key", &self.key)?])
    }
}

/// Items returned by list resources.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemList {
    #[serde(default, alias = "Values", deserialize_with = "null_as_default")]
    pub values: Vec<Item>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn round_trips_all_fields() {
        let mut item = Item::new("item_1", "Item 1", "test_item_type")
            .attribute("cpu", 4)
            .attribute("os", "linux");
        item.description = "Test Item 1".into();
        item.status = 1;
        item.tag = vec!["dev".into()];
        item.meta = Some(json!({"owner": {"team": "ops"}}));
        item.txt = "This is a test text configuration.".into();
        item.partition = "INS".into();
        item.version = Some(2);
        item.enc_key_ix = Some(1);
        item.changed_by = Some("admin".into());

        let bytes = serde_json::to_vec(&item).unwrap();
        let back: Item = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(back, item);
    }

    #[test]
    fn status_and_type_are_always_sent() {
        let value = serde_json::to_value(Item::new("item_2", "Item 2", "t")).unwrap();
        assert_eq!(value, json!({"key": "item_2", "name": "Item 2", "status": 0, "type": "t"}));
    }

    #[test]
    fn null_fields_decode_as_defaults() {
        let json = r#"{"key":"item_1","name":"Item 1","description":null,"status":null,
            "type":"t","tag":null,"meta":null,"txt":null,"attribute":null,"partition":null,
            "version":null}"#;
        let item: Item = serde_json::from_str(json).unwrap();
        assert_eq!(item, Item::new("item_1", "Item 1", "t"));

        let list: ItemList = serde_json::from_str(r#"{"values":null}"#).unwrap();
        assert!(list.values.is_empty());
    }

    #[test]
    fn tags_keep_any_json_value() {
        let json = r#"{"key":"a","tag":["dev",3,{"tier":"web"}]}"#;
        let item: Item = serde_json::from_str(json).unwrap();
        assert_eq!(item.tag, vec![json!("dev"), json!(3), json!({"tier": "web"})]);
    }

    #[test]
    fn list_accepts_either_casing() {
        let lower: ItemList = serde_json::from_str(r#"{"values":[{"key":"a"}]}"#).unwrap();
        let upper: ItemList = serde_json::from_str(r#"{"Values":[{"key":"a"}]}"#).unwrap();
        assert_eq!(lower, upper);
        assert_eq!(lower.values[0].key, "a");
    }
}
