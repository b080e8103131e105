//! Subscriptions to the change notification feed.
//!
//! The service publishes changes to items over an MQTT broker, on one topic
//! per item type (`IT_<key>`) or per item instance (`II_<key>`). This module
//! only describes a subscription; connecting to the broker is left to the
//! caller's MQTT client.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{OnixError, OnixResult};

/// What to receive notifications for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Topic {
    /// Changes to any item of the given item type.
    ItemType(String),
    /// Changes to a single item.
    ItemInstance(String),
}

impl Topic {
    /// Key of the item type or item the topic follows.
    pub fn key(&self) -> &str {
        match self {
            Topic::ItemType(key) | Topic::ItemInstance(key) => key,
        }
    }

    /// Broker topic name.
    pub fn name(&self) -> String {
        match self {
            Topic::ItemType(key) => format!("IT_{key}"),
            Topic::ItemInstance(key) => format!("II_{key}"),
        }
    }
}

/// MQTT delivery guarantee.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QoS {
    #[default]
    AtMostOnce,
    AtLeastOnce,
    ExactlyOnce,
}

impl QoS {
    /// Numeric level as used on the wire.
    pub fn level(self) -> u8 {
        match self {
            QoS::AtMostOnce => 0,
            QoS::AtLeastOnce => 1,
            QoS::ExactlyOnce => 2,
        }
    }
}

/// Broker credentials; both parts are always present.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrokerCredentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for BrokerCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BrokerCredentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// A subscription to change notifications.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventSubscription {
    /// Broker URL, e.g. `tcp://localhost:1883`.
    pub server: String,
    pub topic: Topic,
    #[serde(default)]
    pub qos: QoS,
    #[serde(default)]
    pub credentials: Option<BrokerCredentials>,
    #[serde(default)]
    pub insecure_skip_verify: bool,
}

impl EventSubscription {
    /// Fails when the broker URL or the topic key is empty.
    pub fn new(server: impl Into<String>, topic: Topic) -> OnixResult<Self> {
        let sub = Self {
            server: server.into(),
            topic,
            qos: QoS::default(),
            credentials: None,
            insecure_skip_verify: false,
        };
        sub.check()?;
        Ok(sub)
    }

    pub fn qos(mut self, qos: QoS) -> Self {
        self.qos = qos;
        self
    }

    /// Fails when either part is empty.
    pub fn credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> OnixResult<Self> {
        self.credentials = Some(BrokerCredentials {
            username: username.into(),
            password: password.into(),
        });
        self.check()?;
        Ok(self)
    }

    /// Check a subscription built by hand or decoded from a file.
    pub fn check(&self) -> OnixResult<()> {
        if self.server.trim().is_empty() {
            return Err(OnixError::Validation(
                "event subscription needs a broker server".into(),
            ));
        }
        if self.topic.key().trim().is_empty() {
            return Err(OnixError::Validation(format!(
                "event subscription topic {} has no key",
                self.topic.name()
            )));
        }
        if let Some(creds) = &self.credentials {
            if creds.username.is_empty() || creds.password.is_empty() {
                return Err(OnixError::Validation(
                    "broker credentials need both a username and a password".into(),
                ));
            }
        }
        Ok(())
    }

    pub fn topic_name(&self) -> String {
        self.topic.name()
    }

    /// A broker client id unique to this process and subscription:
    /// `<topic>-<hostname>-<uuid>`.
    pub fn client_id(&self) -> String {
        format!("{}-{}-{}", self.topic.name(), host_name(), Uuid::new_v4())
    }
}

fn host_name() -> String {
    hostname::get()
        .ok()
        .and_then(|h| h.into_string().ok())
        .filter(|h| !h.trim().is_empty())
        .unwrap_or_else(|| "unknown-host".to_string())
}
