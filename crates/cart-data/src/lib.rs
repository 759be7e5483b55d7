//! JSON-over-HTTP client utilities for the storefront cart.
//!
//! A thin builder API on top of `reqwest` with automatic JSON handling and
//! a per-client timeout.
//!
//! # Example
//!
//! ```rust,ignore
//! use cart_data::FetchClient;
//!
//! let client = FetchClient::new().with_base_url("http://localhost:3333");
//!
//! let stock: Stock = client.get("/stock/1").send().await?.error_for_status()?.json()?;
//!
//! client
//!     .patch("/stock/1")
//!     .json(&serde_json::json!({ "amount": 2 }))?
//!     .send()
//!     .await?
//!     .error_for_status()?;
//! ```

mod error;
mod request;
mod response;
mod timeout;

pub use error::FetchError;
pub use request::{Method, RequestBuilder};
pub use response::Response;
pub use timeout::TimeoutConfig;

use request::resolve_url;
use tracing::debug;

/// HTTP client for outbound JSON requests.
#[derive(Debug, Clone)]
pub struct FetchClient {
    http: reqwest::Client,
    base_url: Option<String>,
}

impl Default for FetchClient {
    fn default() -> Self {
        Self::new()
    }
}

impl FetchClient {
    /// Create a new HTTP client with reqwest's default settings.
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: None,
        }
    }

    /// Create a client whose requests are bounded by `timeout`.
    pub fn with_timeout(timeout: TimeoutConfig) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .connect_timeout(timeout.connect)
            .timeout(timeout.total)
            .build()
            .map_err(|e| FetchError::RequestError(e.to_string()))?;
        Ok(Self {
            http,
            base_url: None,
        })
    }

    /// Prepend `base_url` to every relative request path.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// The configured base URL, if any.
    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    /// Create a GET request.
    pub fn get(&self, url: impl Into<String>) -> ClientRequestBuilder {
        self.request(Method::Get, url)
    }

    /// Create a PATCH request.
    pub fn patch(&self, url: impl Into<String>) -> ClientRequestBuilder {
        self.request(Method::Patch, url)
    }

    /// Create a request with a custom method.
    pub fn request(&self, method: Method, url: impl Into<String>) -> ClientRequestBuilder {
        let full_url = resolve_url(self.base_url.as_deref(), url.into());

        ClientRequestBuilder {
            http: self.http.clone(),
            builder: RequestBuilder::new(method, full_url).accept("application/json"),
        }
    }
}

/// A request builder bound to a client.
#[derive(Debug)]
pub struct ClientRequestBuilder {
    http: reqwest::Client,
    builder: RequestBuilder,
}

impl ClientRequestBuilder {
    /// Add a header to the request.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.builder = self.builder.header(key, value);
        self
    }

    /// Set the request body as JSON.
    pub fn json<T: serde::Serialize>(mut self, value: &T) -> Result<Self, FetchError> {
        self.builder = self.builder.json(value)?;
        Ok(self)
    }

    /// The request as it would be sent.
    pub fn as_request(&self) -> &RequestBuilder {
        &self.builder
    }

    /// Send the request and buffer the response.
    ///
    /// Non-2xx statuses are returned as a normal `Response`; call
    /// [`Response::error_for_status`] to turn them into errors.
    pub async fn send(self) -> Result<Response, FetchError> {
        let RequestBuilder {
            method,
            url,
            headers,
            body,
        } = self.builder;

        debug!(method = method.as_str(), url = %url, "Sending request");

        let mut request = self.http.request(method.into(), &url);
        for (key, value) in &headers {
            request = request.header(key.as_str(), value.as_str());
        }
        if let Some(body) = body {
            request = request.body(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?.to_vec();

        debug!(status = status.as_u16(), url = %url, "Received response");

        Ok(Response::new(status, headers, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_resolves_against_base_url() {
        let client = FetchClient::new().with_base_url("http://localhost:3333");
        let req = client.get("/products/3");
        assert_eq!(req.as_request().url(), "http://localhost:3333/products/3");
        assert_eq!(req.as_request().method(), Method::Get);
    }

    #[test]
    fn test_client_sends_json_accept_header() {
        let client = FetchClient::new().with_base_url("http://localhost:3333");
        let req = client.patch("http://api/stock/1");
        assert_eq!(req.as_request().url(), "http://api/stock/1");
        assert_eq!(
            req.as_request().headers.get("Accept").map(String::as_str),
            Some("application/json")
        );
    }

    #[test]
    fn test_client_with_timeout_builds() {
        let client = FetchClient::with_timeout(TimeoutConfig::default()).unwrap();
        assert!(client.base_url().is_none());
    }

    #[tokio::test]
    async fn test_send_to_unreachable_host_is_transport_error() {
        let client = FetchClient::with_timeout(TimeoutConfig::from_total(
            std::time::Duration::from_millis(400),
        ))
        .unwrap()
        .with_base_url("http://127.0.0.1:9");

        let err = client.get("/stock/1").send().await.unwrap_err();
        assert!(!err.is_not_found());
        assert!(err.status().is_none());
    }
}
