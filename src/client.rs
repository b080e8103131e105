//! HTTP client and resource sub-clients for the Onix Web API.
//!
//! The main entry point is [`OnixClient`], built via [`OnixClientBuilder`] or
//! from a [`ClientConfig`]. Every call goes through one pipeline: build the
//! URL, attach the `Authorization` header and, when a payload is sent, its
//! `Content-MD5` and `Content-Length`, issue a single request and normalize
//! the response.

use reqwest::header::{HeaderName, HeaderValue, AUTHORIZATION, CONTENT_LENGTH, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

use crate::auth::Credentials;
use crate::config::ClientConfig;
use crate::error::{OnixError, OnixResult};
use crate::models::*;
use crate::payload::{EncodedPayload, Payload};

/// RFC 1864 integrity header.
pub const CONTENT_MD5: HeaderName = HeaderName::from_static("content-md5");

/// The verbs the Web API understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Get,
    Put,
    Delete,
}

impl Verb {
    fn method(self) -> Method {
        match self {
            Verb::Get => Method::GET,
            Verb::Put => Method::PUT,
            Verb::Delete => Method::DELETE,
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.method().as_str())
    }
}

// ---------------------------------------------------------------------------
// Internal shared state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
struct ClientInner {
    http: reqwest::Client,
    base_url: Url,
    token: Option<HeaderValue>,
}

impl ClientInner {
    /// Build the full URL for a resource from its path segments.
    fn url(&self, segments: &[&str]) -> OnixResult<Url> {
        let mut url = self.base_url.clone();
        {
            let mut path = url.path_segments_mut().map_err(|_| {
                OnixError::Config(format!("{} cannot be used as a base URI", self.base_url))
            })?;
            path.pop_if_empty().extend(segments);
        }
        Ok(url)
    }

    /// Issue exactly one request. Status codes are not inspected here.
    async fn execute(
        &self,
        verb: Verb,
        url: Url,
        payload: Option<&(dyn Payload + Sync)>,
    ) -> OnixResult<reqwest::Response> {
        let mut request = self
            .http
            .request(verb.method(), url.clone())
            .header(CONTENT_TYPE, "application/json");

        if let Some(token) = &self.token {
            request = request.header(AUTHORIZATION, token.clone());
        }

        let mut length = 0;
        if let Some(payload) = payload {
            let encoded = EncodedPayload::new(payload)?;
            length = encoded.len();
            request = request
                .header(CONTENT_MD5, encoded.content_md5())
                .header(CONTENT_LENGTH, length)
                .body(encoded.into_bytes());
        }

        debug!(%verb, %url, bytes = length, "sending request");
        Ok(request.send().await?)
    }

    /// Execute a mutating request and decode the result envelope.
    async fn change(
        &self,
        verb: Verb,
        url: Url,
        payload: Option<&(dyn Payload + Sync)>,
    ) -> OnixResult<OpResult> {
        let resp = self.execute(verb, url.clone(), payload).await?;
        let body = Self::read_body(resp, &url).await?;
        Ok(serde_json::from_slice::<OpResult>(&body)?.normalize())
    }

    /// Execute a GET request and deserialize the JSON response.
    async fn fetch<T: DeserializeOwned>(&self, url: Url) -> OnixResult<T> {
        let resp = self.execute(Verb::Get, url.clone(), None).await?;
        let body = Self::read_body(resp, &url).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Pass a successful response through untouched, reading the body of a
    /// failed one into [`OnixError::Api`].
    async fn check_status(resp: reqwest::Response, url: &Url) -> OnixResult<reqwest::Response> {
        let status = resp.status();
        if status.as_u16() < 300 {
            return Ok(resp);
        }
        let body = resp.bytes().await?;
        Err(api_error(status, url, &body))
    }

    /// Read a successful, non-empty body or turn the response into an error.
    async fn read_body(resp: reqwest::Response, url: &Url) -> OnixResult<Vec<u8>> {
        let body = Self::check_status(resp, url).await?.bytes().await?;
        if body.iter().all(u8::is_ascii_whitespace) {
            return Err(OnixError::EmptyResponse(url.to_string()));
        }
        Ok(body.to_vec())
    }
}

/// Build the error for a non-success status, decoding what the body allows.
fn api_error(status: StatusCode, url: &Url, body: &[u8]) -> OnixError {
    let reason = status.canonical_reason().unwrap_or_default().to_string();
    warn!(status = status.as_u16(), %url, "request failed");

    let decoded = serde_json::from_slice::<OpResult>(body).unwrap_or_default();
    let result = decoded.into_failure(format!(
        "error: response returned status: {} {reason}",
        status.as_u16()
    ));

    OnixError::Api {
        status: status.as_u16(),
        reason,
        url: url.to_string(),
        result: Box::new(result),
    }
}

// ---------------------------------------------------------------------------
// OnixClient
// ---------------------------------------------------------------------------

/// The Onix Web API client.
///
/// Cheap to clone; clones share the connection pool and credentials.
///
/// ```rust,no_run
/// use onix::{Credentials, Model, OnixClient};
///
/// # async fn example() -> Result<(), onix::OnixError> {
/// let client = OnixClient::builder("http://localhost:8080")
///     .credentials(Credentials::basic("admin", "0n1x"))
///     .build()?;
///
/// let result = client.models().put(&Model::new("test_model", "Test Model")).await?;
/// assert!(!result.error);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct OnixClient {
    inner: Arc<ClientInner>,
}

impl OnixClient {
    /// Start building a new client.
    pub fn builder(base_uri: &str) -> OnixClientBuilder {
        OnixClientBuilder {
            base_uri: base_uri.to_string(),
            credentials: None,
            insecure_skip_verify: false,
            timeout: None,
        }
    }

    /// Build a client from loaded configuration.
    pub fn from_config(conf: &ClientConfig) -> OnixResult<Self> {
        conf.check()?;
        let mut builder =
            Self::builder(&conf.base_uri).insecure_skip_verify(conf.insecure_skip_verify);
        if let Some(credentials) = conf.credentials()? {
            builder = builder.credentials(credentials);
        }
        if let Some(secs) = conf.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        builder.build()
    }

    /// A client sending `credentials` instead, sharing this client's transport.
    pub fn with_credentials(&self, credentials: Credentials) -> OnixResult<Self> {
        Ok(Self {
            inner: Arc::new(ClientInner {
                http: self.inner.http.clone(),
                base_url: self.inner.base_url.clone(),
                token: Some(header_value(&credentials)?),
            }),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Absolute URL of a path below the base URI.
    pub fn url(&self, segments: &[&str]) -> OnixResult<Url> {
        self.inner.url(segments)
    }

    /// Issue a request through the pipeline.
    ///
    /// Headers are applied as for typed calls. A status of 300 or above is
    /// returned as [`OnixError::Api`] carrying whatever the body decoded to;
    /// on success the response is returned with its body unread.
    pub async fn execute(
        &self,
        verb: Verb,
        url: Url,
        payload: Option<&(dyn Payload + Sync)>,
    ) -> OnixResult<reqwest::Response> {
        let resp = self.inner.execute(verb, url.clone(), payload).await?;
        ClientInner::check_status(resp, &url).await
    }

    // -- Sub-clients ----------------------------------------------------------

    pub fn models(&self) -> Resources<Model> {
        Resources::new(&self.inner)
    }

    pub fn item_types(&self) -> Resources<ItemType> {
        Resources::new(&self.inner)
    }

    pub fn item_type_attributes(&self) -> Resources<ItemTypeAttribute> {
        Resources::new(&self.inner)
    }

    /// Items, including their children.
    pub fn items(&self) -> Resources<Item> {
        Resources::new(&self.inner)
    }

    pub fn link_types(&self) -> Resources<LinkType> {
        Resources::new(&self.inner)
    }

    pub fn link_type_attributes(&self) -> Resources<LinkTypeAttribute> {
        Resources::new(&self.inner)
    }

    pub fn links(&self) -> Resources<Link> {
        Resources::new(&self.inner)
    }

    pub fn link_rules(&self) -> Resources<LinkRule> {
        Resources::new(&self.inner)
    }

    pub fn partitions(&self) -> Resources<Partition> {
        Resources::new(&self.inner)
    }

    pub fn roles(&self) -> Resources<Role> {
        Resources::new(&self.inner)
    }

    /// Users, with optional notification of new accounts.
    pub fn users(&self) -> Resources<User> {
        Resources::new(&self.inner)
    }

    pub fn privileges(&self) -> Resources<Privilege> {
        Resources::new(&self.inner)
    }

    /// Bulk graph data import.
    pub fn data(&self) -> DataClient {
        DataClient {
            inner: Arc::clone(&self.inner),
        }
    }
}

fn header_value(credentials: &Credentials) -> OnixResult<HeaderValue> {
    let mut value = HeaderValue::from_str(&credentials.header_value())
        .map_err(|e| OnixError::Config(format!("invalid credentials: {e}")))?;
    value.set_sensitive(true);
    Ok(value)
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Builder for [`OnixClient`].
pub struct OnixClientBuilder {
    base_uri: String,
    credentials: Option<Credentials>,
    insecure_skip_verify: bool,
    timeout: Option<Duration>,
}

impl OnixClientBuilder {
    /// Set the credentials sent with every request.
    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Send `token` verbatim as the `Authorization` header.
    pub fn token(self, token: impl Into<String>) -> Self {
        self.credentials(Credentials::Raw(token.into()))
    }

    /// Accept invalid TLS certificates.
    pub fn insecure_skip_verify(mut self, skip: bool) -> Self {
        self.insecure_skip_verify = skip;
        self
    }

    /// Set a request timeout. Without one the transport default applies.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the client.
    pub fn build(self) -> OnixResult<OnixClient> {
        let base_url: Url = self
            .base_uri
            .trim()
            .parse()
            .map_err(|e: url::ParseError| OnixError::Config(e.to_string()))?;

        if base_url.cannot_be_a_base() {
            return Err(OnixError::Config(format!(
                "{base_url} cannot be used as a base URI"
            )));
        }

        let token = self.credentials.as_ref().map(header_value).transpose()?;

        let mut http =
            reqwest::Client::builder().danger_accept_invalid_certs(self.insecure_skip_verify);
        if let Some(timeout) = self.timeout {
            http = http.timeout(timeout);
        }

        Ok(OnixClient {
            inner: Arc::new(ClientInner {
                http: http.build()?,
                base_url,
                token,
            }),
        })
    }
}

// ---------------------------------------------------------------------------
// Resources
// ---------------------------------------------------------------------------

/// Sub-client for one resource kind.
pub struct Resources<R> {
    inner: Arc<ClientInner>,
    kind: PhantomData<fn() -> R>,
}

impl<R> Clone for Resources<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            kind: PhantomData,
        }
    }
}

impl<R: Resource> fmt::Debug for Resources<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resources")
            .field("kind", &R::KIND)
            .field("base_url", &self.inner.base_url.as_str())
            .finish()
    }
}

impl<R: Resource> Resources<R> {
    fn new(inner: &Arc<ClientInner>) -> Self {
        Self {
            inner: Arc::clone(inner),
            kind: PhantomData,
        }
    }

    /// Create or update a resource.
    pub async fn put(&self, resource: &R) -> OnixResult<OpResult> {
        resource.validate()?;
        let url = self.inner.url(&resource.segments()?)?;
        self.inner
            .change(Verb::Put, url, Some(resource as &(dyn Payload + Sync)))
            .await
    }

    /// Fetch the resource addressed by the key(s) set on `resource`.
    pub async fn get(&self, resource: &R) -> OnixResult<R> {
        let url = self.inner.url(&resource.segments()?)?;
        self.inner.fetch(url).await
    }

    /// Delete the resource addressed by the key(s) set on `resource`.
    pub async fn delete(&self, resource: &R) -> OnixResult<OpResult> {
        let url = self.inner.url(&resource.segments()?)?;
        self.inner.change(Verb::Delete, url, None).await
    }
}

impl Resources<Item> {
    /// Items linked from `item`.
    pub async fn children(&self, item: &Item) -> OnixResult<ItemList> {
        let mut segments = item.segments()?;
        segments.push("children");
        let url = self.inner.url(&segments)?;
        self.inner.fetch(url).await
    }
}

impl Resources<User> {
    /// Create or update a user; with `notify` the service emails new users
    /// about their account (requires email integration on the service).
    pub async fn put_notify(&self, user: &User, notify: bool) -> OnixResult<OpResult> {
        user.validate()?;
        let mut url = self.inner.url(&user.segments()?)?;
        url.query_pairs_mut()
            .append_pair("notify", if notify { "true" } else { "false" });
        self.inner
            .change(Verb::Put, url, Some(user as &(dyn Payload + Sync)))
            .await
    }
}

// ---------------------------------------------------------------------------
// DataClient
// ---------------------------------------------------------------------------

/// Sub-client for bulk graph data.
#[derive(Debug, Clone)]
pub struct DataClient {
    inner: Arc<ClientInner>,
}

impl DataClient {
    /// Upsert every resource in `data` with a single request.
    pub async fn put(&self, data: &GraphData) -> OnixResult<OpResult> {
        let url = self.inner.url(&["data"])?;
        self.inner
            .change(Verb::Put, url, Some(data as &(dyn Payload + Sync)))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> OnixClient {
        OnixClient::builder(base).build().unwrap()
    }

    #[test]
    fn urls_join_base_and_segments() {
        let c = client("http://localhost:8080");
        assert_eq!(
            c.url(&["model", "test_model"]).unwrap().as_str(),
            "http://localhost:8080/model/test_model"
        );

        let c = client("https://onix.example.com/api/");
        assert_eq!(
            c.url(&["itemtype", "host", "attribute", "cpu"]).unwrap().as_str(),
            "https://onix.example.com/api/itemtype/host/attribute/cpu"
        );
    }

    #[test]
    fn keys_are_percent_encoded() {
        let c = client("http://localhost:8080");
        assert_eq!(
            c.url(&["item", "a b/c"]).unwrap().as_str(),
            "http://localhost:8080/item/a%20b%2Fc"
        );
    }

    #[test]
    fn rejects_unusable_base_uris() {
        assert!(OnixClient::builder("not a url").build().is_err());
        assert!(OnixClient::builder("mailto:ops@example.com").build().is_err());
    }

    #[test]
    fn rejects_credentials_that_cannot_be_headers() {
        let err = OnixClient::builder("http://localhost:8080")
            .token("bad\ntoken")
            .build()
            .unwrap_err();
        assert!(matches!(err, OnixError::Config(_)));
    }

    #[test]
    fn api_errors_normalize_body() {
        let url = Url::parse("http://localhost:8080/model/m").unwrap();

        let err = api_error(StatusCode::INTERNAL_SERVER_ERROR, &url, b"");
        let result = err.result();
        assert!(result.error);
        assert_eq!(
            result.message,
            "error: response returned status: 500 Internal Server Error"
        );

        let body = br#"{"error":true,"message":"model is referenced by item types","operation":"D"}"#;
        let err = api_error(StatusCode::CONFLICT, &url, body);
        assert_eq!(err.status(), Some(409));
        assert_eq!(err.result().message, "model is referenced by item types");
        assert_eq!(err.result().operation, "D");
    }
}
