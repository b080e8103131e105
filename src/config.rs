use crate::auth::Credentials;
use crate::error::{OnixError, OnixResult};
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    /// Root URI of the Web API, e.g. `http://localhost:8080`.
    pub base_uri: String,
    #[serde(default)]
    pub auth: AuthConfig,
    /// Skip TLS certificate verification.
    #[serde(default)]
    pub insecure_skip_verify: bool,
    /// Request timeout; the transport default applies when unset.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

#[derive(Clone, Default, Deserialize)]
pub struct AuthConfig {
    #[serde(default)]
    pub mode: AuthMode,
    pub username: Option<String>,
    pub password: Option<String>,
    pub token: Option<String>,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("mode", &self.mode)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("token", &self.token.as_ref().map(|_| "***"))
            .finish()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthMode {
    #[default]
    #[serde(rename = "none")]
    Anonymous,
    Basic,
    Bearer,
    /// `token` is sent verbatim.
    Token,
}

impl ClientConfig {
    pub fn new(base_uri: impl Into<String>) -> Self {
        Self {
            base_uri: base_uri.into(),
            auth: AuthConfig::default(),
            insecure_skip_verify: false,
            timeout_secs: None,
        }
    }

    /// Checks the configuration is complete.
    pub fn check(&self) -> OnixResult<()> {
        if self.base_uri.trim().is_empty() {
            return Err(OnixError::Config("base_uri is not set".to_string()));
        }
        self.credentials().map(|_| ())
    }

    /// Credentials described by the `auth` section.
    pub fn credentials(&self) -> OnixResult<Option<Credentials>> {
        let auth = &self.auth;
        match auth.mode {
            AuthMode::Anonymous => Ok(None),
            AuthMode::Basic => match (non_empty(&auth.username), non_empty(&auth.password)) {
                (Some(user), Some(pwd)) => Ok(Some(Credentials::basic(user, pwd))),
                _ => Err(OnixError::Config(
                    "basic authentication requires auth.username and auth.password".to_string(),
                )),
            },
            AuthMode::Bearer | AuthMode::Token => {
                let token = non_empty(&auth.token).ok_or_else(|| {
                    OnixError::Config(format!(
                        "'{}' authentication requires auth.token",
                        if auth.mode == AuthMode::Bearer { "bearer" } else { "token" }
                    ))
                })?;
                Ok(Some(if auth.mode == AuthMode::Bearer {
                    Credentials::bearer(token)
                } else {
                    Credentials::Raw(token.to_string())
                }))
            }
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

/// Load client configuration from `onix.*` in the working directory, an
/// optional explicit file and `ONIX__*` environment variables, in that order.
pub fn load_config(path: Option<&Path>) -> OnixResult<ClientConfig> {
    load_with_env(path, Environment::with_prefix("ONIX").separator("__"))
}

fn load_with_env(path: Option<&Path>, env: Environment) -> OnixResult<ClientConfig> {
    let mut builder = Config::builder().add_source(File::with_name("onix").required(false));

    if let Some(path) = path {
        builder = builder.add_source(File::from(path).required(true));
    }

    let config = builder
        .add_source(env)
        .build()
        .map_err(|err| OnixError::Config(err.to_string()))?;

    let parsed: ClientConfig = config
        .try_deserialize()
        .map_err(|err| OnixError::Config(err.to_string()))?;

    parsed.check()?;
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(vars: &[(&str, &str)]) -> Environment {
        let source: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Environment::with_prefix("ONIX")
            .separator("__")
            .source(Some(source))
    }

    fn toml_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_file_with_basic_auth() {
        let file = toml_file(
            r#"
            base_uri = "http://localhost:8080"
            insecure_skip_verify = true

            [auth]
            mode = "basic"
            username = "admin"
            password = "0n1x"
            "#,
        );
        let conf = load_with_env(Some(file.path()), env(&[])).unwrap();
        assert_eq!(conf.base_uri, "http://localhost:8080");
        assert!(conf.insecure_skip_verify);
        assert_eq!(conf.timeout_secs, None);
        assert_eq!(
            conf.credentials().unwrap().unwrap().header_value(),
            "Basic YWRtaW46MG4xeA=="
        );
    }

    #[test]
    fn environment_overrides_file() {
        let file = toml_file(r#"base_uri = "http://localhost:8080""#);
        let conf = load_with_env(
            Some(file.path()),
            env(&[
                ("ONIX__BASE_URI", "https://onix.example.com"),
                ("ONIX__AUTH__MODE", "bearer"),
                ("ONIX__AUTH__TOKEN", "abc"),
            ]),
        )
        .unwrap();
        assert_eq!(conf.base_uri, "https://onix.example.com");
        assert_eq!(conf.auth.mode, AuthMode::Bearer);
        assert_eq!(
            conf.credentials().unwrap().unwrap().header_value(),
            "Bearer abc"
        );
    }

    #[test]
    fn incomplete_credentials_are_rejected() {
        let mut conf = ClientConfig::new("http://localhost:8080");
        conf.auth.mode = AuthMode::Basic;
        conf.auth.username = Some("admin".into());
        assert!(matches!(conf.check(), Err(OnixError::Config(_))));

        conf.auth.mode = AuthMode::Token;
        assert!(conf.check().is_err());
        conf.auth.token = Some("Token xyz".into());
        assert!(conf.check().is_ok());
    }

    #[test]
    fn base_uri_is_required() {
        assert!(ClientConfig::new(" ").check().is_err());
        assert!(ClientConfig::new("http://localhost:8080").check().is_ok());
    }
}
