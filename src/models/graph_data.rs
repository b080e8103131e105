//! Bulk graph data, imported in a single request.

use serde::{Deserialize, Serialize};

use super::resource::null_as_default;
use super::{Item, ItemType, ItemTypeAttribute, Link, LinkRule, LinkType, LinkTypeAttribute, Model};

/// A batch of resources the service upserts in dependency order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GraphData {
    #[serde(deserialize_with = "null_as_default")]
    pub models: Vec<Model>,
    #[serde(deserialize_with = "null_as_default")]
    pub item_types: Vec<ItemType>,
    #[serde(deserialize_with = "null_as_default")]
    pub item_type_attributes: Vec<ItemTypeAttribute>,
    #[serde(deserialize_with = "null_as_default")]
    pub link_types: Vec<LinkType>,
    #[serde(deserialize_with = "null_as_default")]
    pub link_type_attributes: Vec<LinkTypeAttribute>,
    #[serde(deserialize_with = "null_as_default")]
    pub link_rules: Vec<LinkRule>,
    #[serde(deserialize_with = "null_as_default")]
    pub items: Vec<Item>,
    #[serde(deserialize_with = "null_as_default")]
    pub links: Vec<Link>,
}

impl GraphData {
    /// Total number of resources in the batch.
    pub fn len(&self) -> usize {
        self.models.len()
            + self.item_types.len()
            + self.item_type_attributes.len()
            + self.link_types.len()
            + self.link_type_attributes.len()
            + self.link_rules.len()
            + self.items.len()
            + self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_partial_batches() {
        let json = r#"{
            "models": [{"key": "m", "name": "M"}],
            "itemTypes": [{"key": "t", "name": "T", "modelKey": "m"}],
            "items": [{"key": "i", "name": "I", "type": "t"}]
        }"#;
        let data: GraphData = serde_json::from_str(json).unwrap();
        assert_eq!(data.len(), 3);
        assert_eq!(data.item_types[0].model_key, "m");
        assert!(data.links.is_empty());
    }

    #[test]
    fn uses_service_collection_names() {
        let value = serde_json::to_value(GraphData::default()).unwrap();
        for field in [
            "models",
            "itemTypes",
            "itemTypeAttributes",
            "linkTypes",
            "linkTypeAttributes",
            "linkRules",
            "items",
            "links",
        ] {
            assert!(value.get(field).is_some(), "missing {field}");
        }
    }
}
