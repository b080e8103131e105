//! Data models for the Onix Web API.
//!
//! Every keyed resource implements [`Resource`], which tells the client
//! where the resource lives. JSON field names follow the service's camelCase
//! convention; fields the server fills in (`version`, `created`, `updated`,
//! `changedBy`) are optional and only sent when set.

pub mod graph_data;
pub mod item;
pub mod item_type;
pub mod link;
pub mod link_rule;
pub mod link_type;
pub mod model;
pub mod partition;
pub mod privilege;
pub mod resource;
pub mod result;
pub mod role;
pub mod type_attribute;
pub mod user;

pub use graph_data::GraphData;
pub use item::{Item, ItemList};
pub use item_type::ItemType;
pub use link::Link;
pub use link_rule::LinkRule;
pub use link_type::LinkType;
pub use model::Model;
pub use partition::Partition;
pub use privilege::Privilege;
pub use resource::Resource;
pub use result::OpResult;
pub use role::Role;
pub use type_attribute::{ItemTypeAttribute, LinkTypeAttribute};
pub use user::User;
