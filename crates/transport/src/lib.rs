//! HTTP transport abstraction for Yandex Cloud API calls
//!
//! Defines the `Transport` trait that decouples credential exchange and
//! request dispatch from the concrete HTTP stack. `ReqwestTransport` is the
//! production implementation; tests substitute scripted transports or point
//! the reqwest one at a mock server.
//!
//! No retry, backoff or circuit breaking: a transport
//! sends exactly one request per `send` call.

pub mod reqwest_transport;

pub use reqwest::Method;
pub use reqwest::header::{self, HeaderMap, HeaderName, HeaderValue};
pub use reqwest_transport::{HttpSettings, ReqwestTransport};

use bytes::Bytes;
use std::future::Future;
use std::pin::Pin;

/// A single outgoing request.
///
/// `query` pairs are appended to `url` by the transport, after any query the
/// URL already carries.
#[derive(Debug, Clone)]
pub struct TransportRequest {
    pub method: Method,
    pub url: String,
    pub headers: HeaderMap,
    pub json: Option<serde_json::Value>,
    pub query: Vec<(String, String)>,
}

impl TransportRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HeaderMap::new(),
            json: None,
            query: Vec::new(),
        }
    }

    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    pub fn with_json(mut self, body: serde_json::Value) -> Self {
        self.json = Some(body);
        self
    }

    pub fn with_query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }
}

/// Raw upstream response: status and body bytes, nothing interpreted.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: u16,
    pub body: Bytes,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Body decoded as UTF-8, lossy.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Underlying cause of a transport failure. The reqwest error in production;
/// plain messages in scripted transports.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Transport-level failures. HTTP error statuses are not errors here; they
/// come back as a `TransportResponse` for the caller to classify.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("request timed out: {0}")]
    Timeout(#[source] BoxError),

    #[error("connection failed: {0}")]
    Connect(#[source] BoxError),

    #[error("request failed: {0}")]
    Request(#[source] BoxError),

    #[error("failed to read response body: {0}")]
    Body(#[source] BoxError),

    #[error("invalid URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
}

/// Result alias for transport operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Sends one HTTP request and returns the raw response.
///
/// Uses a `Pin<Box<dyn Future>>` return type so the trait stays
/// dyn-compatible (`Arc<dyn Transport>`).
pub trait Transport: Send + Sync {
    fn send(
        &self,
        request: TransportRequest,
    ) -> Pin<Box<dyn Future<Output = Result<TransportResponse>> + Send + '_>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_builder_sets_fields() {
        let mut headers = HeaderMap::new();
        headers.insert("x-request-id", HeaderValue::from_static("abc"));
        let request = TransportRequest::new(Method::PATCH, "https://iam.example/iam/v1/apiKeys/k1")
            .with_headers(headers)
            .with_json(serde_json::json!({"description": "ci"}))
            .with_query(vec![("updateMask".into(), "description".into())]);

        assert_eq!(request.method, Method::PATCH);
        assert_eq!(request.headers.get("x-request-id").unwrap(), "abc");
        assert_eq!(request.json.unwrap()["description"], "ci");
        assert_eq!(request.query, vec![("updateMask".to_string(), "description".to_string())]);
    }

    #[test]
    fn response_text_is_lossy_utf8() {
        let response = TransportResponse::new(404, bytes::Bytes::from_static(b"not \xF0found"));
        assert_eq!(response.status, 404);
        assert!(response.text().starts_with("not "));
    }

    #[test]
    fn error_messages_carry_details() {
        let err = Error::InvalidUrl {
            url: "iam/v1".into(),
            reason: "relative URL without a base".into(),
        };
        assert_eq!(
            err.to_string(),
            "invalid URL iam/v1: relative URL without a base"
        );
        assert!(Error::Timeout("30s".into()).to_string().contains("30s"));
    }

    #[test]
    fn cause_is_kept_as_source() {
        use std::error::Error as _;
        let err = Error::Connect("connection refused".into());
        assert_eq!(err.source().unwrap().to_string(), "connection refused");
    }
}
