//! Authorization header values.

use base64::{engine::general_purpose::STANDARD, Engine as _};

/// Credentials sent in the `Authorization` header of every request.
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// HTTP basic authentication.
    Basic { username: String, password: String },
    /// A pre-obtained bearer token, e.g. from an OAuth 2.0 provider.
    Bearer(String),
    /// A complete header value, sent verbatim.
    Raw(String),
}

impl Credentials {
    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Credentials::Basic {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn bearer(token: impl Into<String>) -> Self {
        Credentials::Bearer(token.into())
    }

    /// The `Authorization` header value.
    pub fn header_value(&self) -> String {
        match self {
            Credentials::Basic { username, password } => basic_token(username, password),
            Credentials::Bearer(token) => format!("Bearer {token}"),
            Credentials::Raw(value) => value.clone(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Credentials::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", &"***")
                .finish(),
            Credentials::Bearer(_) => f.write_str("Bearer(***)"),
            Credentials::Raw(_) => f.write_str("Raw(***)"),
        }
    }
}

/// `Basic base64(user:pwd)`.
pub fn basic_token(username: &str, password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{username}:{password}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_token_encoding() {
        assert_eq!(basic_token("admin", "0n1x"), "Basic YWRtaW46MG4xeA==");
    }

    #[test]
    fn header_values() {
        assert_eq!(
            Credentials::basic("admin", "0n1x").header_value(),
            "Basic YWRtaW46MG4xeA=="
        );
        assert_eq!(Credentials::bearer("abc").header_value(), "Bearer abc");
        assert_eq!(Credentials::Raw("Token xyz".into()).header_value(), "Token xyz");
    }

    #[test]
    fn debug_hides_secrets() {
        let printed = format!("{:?}", Credentials::basic("admin", "0n1x"));
        assert!(printed.contains("admin"));
        assert!(!printed.contains("0n1x"));
        assert_eq!(format!("{:?}", Credentials::bearer("abc")), "Bearer(***)");
    }
}
