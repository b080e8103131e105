//! The capability shared by every keyed Onix resource.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{OnixError, OnixResult};

/// A resource addressable under the service root.
///
/// Implementors state where they live; the client handles the rest.
pub trait Resource: Serialize + DeserializeOwned + Send + Sync {
    /// Kind name used in error messages.
    const KIND: &'static str;

    /// Path segments of this resource, e.g. `["model", "test_model"]`.
    ///
    /// Fails with [`OnixError::Validation`] when a key needed to address the
    /// resource is missing.
    fn segments(&self) -> OnixResult<Vec<&str>>;

    /// Checks run before the resource is sent to the service.
    fn validate(&self) -> OnixResult<()> {
        self.segments().map(|_| ())
    }
}

/// Returns `value` or a validation error naming the missing field.
pub(crate) fn required<'a>(kind: &str, field: &str, value: &'a str) -> OnixResult<&'a str> {
    if value.trim().is_empty() {
        Err(OnixError::Validation(format!(
            "the {kind} does not have a {field}: cannot construct resource URI"
        )))
    } else {
        Ok(value)
    }
}

pub(crate) fn is_false(value: &bool) -> bool {
    !*value
}

/// Decodes an explicit JSON `null` as the field's default.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
