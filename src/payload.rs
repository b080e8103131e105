//! Payload serialization and RFC 1864 integrity checksums.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::Serialize;

use crate::error::OnixResult;

/// An entity that can be sent as a request body.
///
/// Implemented for every `serde::Serialize` type, so resource structs,
/// maps and `serde_json::Value`s all qualify.
pub trait Payload {
    /// Canonical JSON bytes of the entity. `<` and `>` are not escaped.
    fn to_json(&self) -> OnixResult<Vec<u8>>;

    /// Number of bytes `to_json` produces.
    fn byte_len(&self) -> OnixResult<usize> {
        Ok(self.to_json()?.len())
    }
}

impl<T: Serialize> Payload for T {
    fn to_json(&self) -> OnixResult<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }
}

/// Base64 encoded MD5 digest of `bytes`, as sent in `Content-MD5`.
pub fn content_md5(bytes: &[u8]) -> String {
    STANDARD.encode(md5::compute(bytes).0)
}

/// A payload serialized once, together with its integrity headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedPayload {
    bytes: Vec<u8>,
    checksum: String,
}

impl EncodedPayload {
    /// Serialize `payload` and compute its checksum.
    pub fn new(payload: &dyn Payload) -> OnixResult<Self> {
        let bytes = payload.to_json()?;
        let checksum = content_md5(&bytes);
        Ok(Self { bytes, checksum })
    }

    /// Value of the `Content-MD5` header.
    pub fn content_md5(&self) -> &str {
        &self.checksum
    }

    /// Value of the `Content-Length` header.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn md5_of_empty_input() {
        assert_eq!(content_md5(b""), "1B2M2Y8AsgTpgAmY7PhCfg==");
    }

    #[test]
    fn checksum_covers_serialized_bytes() {
        let payload = json!({"key": "test_model", "name": "Test Model"});
        let encoded = EncodedPayload::new(&payload).unwrap();

        assert_eq!(encoded.as_bytes(), br#"{"key":"test_model","name":"Test Model"}"#);
        assert_eq!(encoded.len(), 40);
        assert_eq!(encoded.len(), payload.byte_len().unwrap());
        assert_eq!(encoded.content_md5(), "upb1ikZi7dfvQOC8VuaKkQ==");
    }

    #[test]
    fn angle_brackets_are_not_escaped() {
        let payload = json!({"txt": "<config>a && b</config>"});
        let bytes = payload.to_json().unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            r#"{"txt":"<config>a && b</config>"}"#
        );
    }
}
