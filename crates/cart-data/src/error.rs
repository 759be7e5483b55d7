//! HTTP client error types.

use http::StatusCode;
use thiserror::Error;

/// Errors that can occur when talking to a remote JSON API.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Failed to send the request.
    #[error("Request failed: {0}")]
    RequestError(String),

    /// Could not reach the remote host.
    #[error("Connection failed: {0}")]
    Connection(String),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// HTTP error response.
    #[error("HTTP {status}: {message}")]
    HttpError { status: u16, message: String },

    /// Failed to parse response body.
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Request timeout.
    #[error("Request timed out")]
    Timeout,

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(String),
}

impl FetchError {
    /// HTTP status carried by the error, if the server answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            FetchError::HttpError { status, .. } => StatusCode::from_u16(*status).ok(),
            _ => None,
        }
    }

    /// Whether the server answered 404.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }

    /// Build an error for a given status code with an empty message.
    pub fn from_status(status: StatusCode) -> Self {
        FetchError::HttpError {
            status: status.as_u16(),
            message: status
                .canonical_reason()
                .unwrap_or("Unknown error")
                .to_string(),
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::JsonError(e.to_string())
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchError::Timeout
        } else if e.is_connect() {
            FetchError::Connection(e.to_string())
        } else if e.is_builder() {
            FetchError::InvalidUrl(e.to_string())
        } else if let Some(status) = e.status() {
            FetchError::from_status(status)
        } else {
            FetchError::RequestError(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_detection() {
        let err = FetchError::from_status(StatusCode::NOT_FOUND);
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "HTTP 404: Not Found");
    }

    #[test]
    fn test_other_status_is_not_not_found() {
        let err = FetchError::from_status(StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!err.is_not_found());
        assert_eq!(err.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
    }

    #[test]
    fn test_transport_errors_have_no_status() {
        assert_eq!(FetchError::Timeout.status(), None);
        assert!(!FetchError::Connection("refused".into()).is_not_found());
    }
}
