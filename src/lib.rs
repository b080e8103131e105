//! # Onix client for Rust
//!
//! A typed client for the **Onix** configuration manager Web API.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use onix::{Credentials, Item, ItemType, Model, OnixClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), onix::OnixError> {
//!     let client = OnixClient::builder("http://localhost:8080")
//!         .credentials(Credentials::basic("admin", "0n1x"))
//!         .build()?;
//!
//!     client.models().put(&Model::new("test_model", "Test Model")).await?;
//!     client
//!         .item_types()
//!         .put(&ItemType::new("host", "Host", "test_model"))
//!         .await?;
//!
//!     let result = client
//!         .items()
//!         .put(&Item::new("web-01", "Web server", "host").attribute("cpu", 4))
//!         .await?;
//!     println!("changed: {}, operation: {}", result.changed, result.operation);
//!
//!     let item = client.items().get(&Item::new("web-01", "", "")).await?;
//!     println!("{} is a {}", item.name, item.item_type);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! | Sub-client | Access | Resource path |
//! |------------|--------|---------------|
//! | models | `client.models()` | `/model/{key}` |
//! | item types | `client.item_types()` | `/itemtype/{key}` |
//! | item type attributes | `client.item_type_attributes()` | `/itemtype/{type}/attribute/{key}` |
//! | items | `client.items()` | `/item/{key}`, `/item/{key}/children` |
//! | link types | `client.link_types()` | `/linktype/{key}` |
//! | link type attributes | `client.link_type_attributes()` | `/linktype/{type}/attribute/{key}` |
//! | links | `client.links()` | `/link/{key}` |
//! | link rules | `client.link_rules()` | `/linkrule/{key}` |
//! | partitions | `client.partitions()` | `/partition/{key}` |
//! | roles | `client.roles()` | `/role/{key}` |
//! | users | `client.users()` | `/user/{key}` |
//! | privileges | `client.privileges()` | `/privilege/{key}` |
//! | graph data | `client.data()` | `/data` |
//!
//! Every request carries `Content-Type: application/json` and, when
//! configured, the `Authorization` header. Requests with a body also carry
//! `Content-MD5` (RFC 1864) and `Content-Length`.

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod events;
pub mod models;
pub mod payload;

pub use auth::Credentials;
pub use client::{DataClient, OnixClient, OnixClientBuilder, Resources, Verb};
pub use config::{load_config, AuthMode, ClientConfig};
pub use error::{OnixError, OnixResult};
pub use events::{EventSubscription, QoS, Topic};
pub use models::*;
pub use payload::{content_md5, EncodedPayload, Payload};
