//! Error types for the Onix client.

use thiserror::Error;

use crate::models::OpResult;

/// Errors that can occur when talking to the Onix Web API.
#[derive(Error, Debug)]
pub enum OnixError {
    /// The server answered with a non-success status.
    ///
    /// `result` holds whatever the body decoded to, normalized so that it is
    /// always flagged as an error and carries a message.
    #[error("error: response returned status: {status} {reason}. resource: {url}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Canonical reason phrase for the status.
        reason: String,
        /// The resource the request was sent to.
        url: String,
        /// Best-effort decoded response body.
        result: Box<OpResult>,
    },

    /// A network or transport error occurred.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Failed to serialize or deserialize JSON.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The server sent no body where one was expected.
    #[error("error: response was empty for resource: {0}")]
    EmptyResponse(String),

    /// The resource failed validation before any request was sent.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Invalid configuration (e.g. missing credentials).
    #[error("Configuration error: {0}")]
    Config(String),

    /// URL parsing error.
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),
}

impl OnixError {
    /// The result envelope to report for this error.
    ///
    /// API errors return the decoded body; every other error yields a
    /// synthetic error result carrying the error text.
    pub fn result(&self) -> OpResult {
        match self {
            OnixError::Api { result, .. } => (**result).clone(),
            other => OpResult::failure(other.to_string()),
        }
    }

    /// HTTP status code, if the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            OnixError::Api { status, .. } => Some(*status),
            OnixError::Network(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Whether the server reported the resource as missing.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

/// Convenience type alias for client results.
pub type OnixResult<T> = Result<T, OnixError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synthetic_result_for_transport_like_errors() {
        let err = OnixError::EmptyResponse("http://localhost:8080/model/m".into());
        let result = err.result();
        assert!(result.error);
        assert!(!result.changed);
        assert_eq!(
            result.message,
            "error: response was empty for resource: http://localhost:8080/model/m"
        );
    }

    #[test]
    fn api_error_exposes_decoded_body() {
        let body = OpResult {
            error: true,
            message: "item type not found".into(),
            operation: "L".into(),
            ..Default::default()
        };
        let err = OnixError::Api {
            status: 404,
            reason: "Not Found".into(),
            url: "http://localhost:8080/item/x".into(),
            result: Box::new(body.clone()),
        };
        assert_eq!(err.result(), body);
        assert!(err.is_not_found());
        assert_eq!(
            err.to_string(),
            "error: response returned status: 404 Not Found. resource: http://localhost:8080/item/x"
        );
    }
}
