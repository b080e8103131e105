//! Service users.

use serde::{Deserialize, Serialize};

use super::resource::{null_as_default, required, Resource};
use crate::error::OnixResult;

/// A user account.
///
/// `pwd` is only sent when set; the service never returns it.
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct User {
    #[serde(deserialize_with = "null_as_default")]
    pub key: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "null_as_default")]
    pub pwd: String,
    /// Expiry date of the account, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub changed_by: Option<String>,
}

impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("key", &self.key)
            .field("name", &self.name)
            .field("email", &self.email)
            .field("pwd", &if self.pwd.is_empty() { "" } else { "***" })
            .field("expires", &self.expires)
            .field("version", &self.version)
            .finish_non_exhaustive()
    }
}

impl Resource for User {
    const KIND: &'static str = "user";

    fn segments(&self) -> OnixResult<Vec<&str>> {
        Ok(vec!["user", required(Self::KIND, "key", &self.key)?])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_masks_password() {
        let user = User {
            key: "jdoe".into(),
            name: "J Doe".into(),
            email: "jdoe@example.com".into(),
            pwd: "s3cr3t".into(),
            ..Default::default()
        };
        let printed = format!("{user:?}");
        assert!(printed.contains("***"));
        assert!(!printed.contains("s3cr3t"));
    }
}
