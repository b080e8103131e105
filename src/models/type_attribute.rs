//! Attributes declared on item types and link types.

use serde::{Deserialize, Serialize};

use super::resource::{is_false, null_as_default, required, Resource};
use crate::error::OnixResult;

/// An attribute that items of a given item type may carry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ItemTypeAttribute {
    #[serde(deserialize_with = "null_as_default")]
    pub key: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "null_as_default")]
    pub description: String,
    /// Value type of the attribute, e.g. `string` or `integer`.
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub value_type: String,
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "null_as_default")]
    pub def_value: String,
    #[serde(skip_serializing_if = "is_false", deserialize_with = "null_as_default")]
    pub managed: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub required: bool,
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "null_as_default")]
    pub regex: String,
    #[serde(deserialize_with = "null_as_default")]
    pub item_type_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub changed_by: Option<String>,
}

impl ItemTypeAttribute {
    pub fn new(item_type_key: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            item_type_key: item_type_key.into(),
            key: key.into(),
            ..Default::default()
        }
    }
}

impl Resource for ItemTypeAttribute {
    const KIND: &'static str = "item type attribute";

    fn segments(&self) -> OnixResult<Vec<&str>> {
        Ok(vec![
            "itemtype",
            required(Self::KIND, "item type key", &self.item_type_key)?,
            "attribute",
            required(Self::KIND, "key", &self.key)?,
        ])
    }
}

/// An attribute that links of a given link type may carry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LinkTypeAttribute {
    #[serde(deserialize_with = "null_as_default")]
    pub key: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub value_type: String,
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "null_as_default")]
    pub def_value: String,
    #[serde(skip_serializing_if = "is_false", deserialize_with = "null_as_default")]
    pub managed: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub required: bool,
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "null_as_default")]
    pub regex: String,
    #[serde(deserialize_with = "null_as_default")]
    pub link_type_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub changed_by: Option<String>,
}

impl LinkTypeAttribute {
    pub fn new(link_type_key: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            link_type_key: link_type_key.into(),
            key: key.into(),
            ..Default::default()
        }
    }
}

impl Resource for LinkTypeAttribute {
    const KIND: &'static str = "link type attribute";

    fn segments(&self) -> OnixResult<Vec<&str>> {
        Ok(vec![
            "linktype",
            required(Self::KIND, "link type key", &self.link_type_key)?,
            "attribute",
            required(Self::KIND, "key", &self.key)?,
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attribute_paths_nest_under_their_type() {
        let attr = ItemTypeAttribute::new("host", "cpu");
        assert_eq!(
            attr.segments().unwrap(),
            vec!["itemtype", "host", "attribute", "cpu"]
        );

        let attr = LinkTypeAttribute::new("network", "bandwidth");
        assert_eq!(
            attr.segments().unwrap(),
            vec!["linktype", "network", "attribute", "bandwidth"]
        );
    }

    #[test]
    fn parent_key_is_checked_first() {
        let err = ItemTypeAttribute::new("", "cpu").validate().unwrap_err();
        assert!(err.to_string().contains("item type key"));
    }

    #[test]
    fn type_field_is_renamed() {
        let mut attr = LinkTypeAttribute::new("network", "bandwidth");
        attr.value_type = "integer".into();
        attr.def_value = "100".into();
        let value = serde_json::to_value(&attr).unwrap();
        assert_eq!(value["type"], "integer");
        assert_eq!(value["defValue"], "100");
        assert_eq!(value["linkTypeKey"], "network");
    }
}
