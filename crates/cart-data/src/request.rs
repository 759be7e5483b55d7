//! HTTP request builder.

use crate::FetchError;
use serde::Serialize;
use std::collections::HashMap;

/// HTTP methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Patch,
}

impl Method {
    /// Convert to HTTP method string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Patch => "PATCH",
        }
    }
}

impl From<Method> for http::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => http::Method::GET,
            Method::Patch => http::Method::PATCH,
        }
    }
}

/// A transport-independent description of an outbound request.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    pub(crate) method: Method,
    pub(crate) url: String,
    pub(crate) headers: HashMap<String, String>,
    pub(crate) body: Option<Vec<u8>>,
}

impl RequestBuilder {
    /// Create a new request builder.
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HashMap::new(),
            body: None,
        }
    }

    /// The request method.
    pub fn method(&self) -> Method {
        self.method
    }

    /// The fully resolved URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Add a header to the request.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Set the request body as JSON.
    pub fn json<T: Serialize>(mut self, value: &T) -> Result<Self, FetchError> {
        let json = serde_json::to_vec(value)?;
        self.headers
            .insert("Content-Type".to_string(), "application/json".to_string());
        self.body = Some(json);
        Ok(self)
    }

    /// Set the Accept header.
    pub fn accept(self, content_type: impl Into<String>) -> Self {
        self.header("Accept", content_type)
    }
}

/// Join a base URL and a path, leaving absolute URLs untouched.
pub(crate) fn resolve_url(base: Option<&str>, url: String) -> String {
    match base {
        Some(base) if !url.starts_with("http://") && !url.starts_with("https://") => {
            format!(
                "{}/{}",
                base.trim_end_matches('/'),
                url.trim_start_matches('/')
            )
        }
        _ => url,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_relative_path() {
        let url = resolve_url(Some("http://localhost:3333/"), "/stock/1".to_string());
        assert_eq!(url, "http://localhost:3333/stock/1");
    }

    #[test]
    fn test_resolve_keeps_absolute_url() {
        let url = resolve_url(Some("http://localhost:3333"), "https://cdn.example/x".to_string());
        assert_eq!(url, "https://cdn.example/x");
    }

    #[test]
    fn test_resolve_without_base() {
        assert_eq!(resolve_url(None, "/products/2".to_string()), "/products/2");
    }

    #[test]
    fn test_json_body_sets_content_type() {
        let req = RequestBuilder::new(Method::Patch, "/stock/1")
            .json(&serde_json::json!({ "amount": 4 }))
            .unwrap();
        assert_eq!(
            req.headers.get("Content-Type").map(String::as_str),
            Some("application/json")
        );
        assert_eq!(req.body.as_deref(), Some(br#"{"amount":4}"#.as_slice()));
    }

    #[test]
    fn test_method_conversion() {
        assert_eq!(http::Method::from(Method::Patch), http::Method::PATCH);
        assert_eq!(Method::Get.as_str(), "GET");
    }
}
