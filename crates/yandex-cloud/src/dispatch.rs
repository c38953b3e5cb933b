//! Authenticated request dispatch shared by every resource group
//!
//! `Dispatcher::execute` is the one path a resource call takes: fetch a valid
//! IAM token, set `Authorization: Bearer`, send through the transport, then
//! classify the response with `parse_response`. Nothing is retried.

use std::sync::Arc;
use std::time::Instant;

use serde_json::{Map, Value};
use tracing::debug;
use transport::header::AUTHORIZATION;
use transport::{HeaderMap, HeaderValue, Method, Transport, TransportRequest, TransportResponse};
use yandex_auth::CredentialManager;

use crate::error::{ApiError, Error, Result};

/// Per-call options: extra headers, JSON body, query pairs.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub headers: HeaderMap,
    pub json: Option<Value>,
    pub query: Vec<(String, String)>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn json(mut self, body: Value) -> Self {
        self.json = Some(body);
        self
    }

    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    pub fn headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }
}

/// Sends authenticated requests to one API host.
///
/// Cheap to clone; the transport and credential manager are shared.
#[derive(Clone)]
pub struct Dispatcher {
    base_url: String,
    transport: Arc<dyn Transport>,
    credentials: Arc<CredentialManager>,
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl Dispatcher {
    pub fn new(
        base_url: impl Into<String>,
        transport: Arc<dyn Transport>,
        credentials: Arc<CredentialManager>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            transport,
            credentials,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn credentials(&self) -> &Arc<CredentialManager> {
        &self.credentials
    }

    /// Resolve `path` against the base URL. Absolute URLs pass through.
    pub fn url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Run one authenticated request and return the parsed body.
    ///
    /// Authentication failures propagate as `Error::Authentication`;
    /// transport failures and error statuses come back as `Error::Api`.
    pub async fn execute(&self, method: Method, path: &str, options: RequestOptions) -> Result<Value> {
        let token = self.credentials.get_valid_token().await?;

        let mut headers = options.headers;
        let bearer = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|e| ApiError::Transport(transport::Error::Request(Box::new(e))))?;
        headers.insert(AUTHORIZATION, bearer);

        let url = self.url(path);
        let method_label = method.to_string();
        debug!(method = %method_label, url = %url, "dispatching API request");

        let mut request = TransportRequest::new(method, url)
            .with_headers(headers)
            .with_query(options.query);
        request.json = options.json;

        let started = Instant::now();
        let response = match self.transport.send(request).await {
            Ok(response) => response,
            Err(e) => {
                crate::metrics::record_request(
                    &method_label,
                    "error",
                    started.elapsed().as_secs_f64(),
                );
                return Err(ApiError::Transport(e).into());
            }
        };
        crate::metrics::record_request(
            &method_label,
            &response.status.to_string(),
            started.elapsed().as_secs_f64(),
        );
        debug!(status = response.status, "API response received");

        parse_response(&response)
    }

    pub async fn get(&self, path: &str) -> Result<Value> {
        self.execute(Method::GET, path, RequestOptions::new()).await
    }

    pub async fn delete(&self, path: &str) -> Result<Value> {
        self.execute(Method::DELETE, path, RequestOptions::new()).await
    }

    pub async fn post(&self, path: &str, body: Option<Value>) -> Result<Value> {
        let mut options = RequestOptions::new();
        options.json = body;
        self.execute(Method::POST, path, options).await
    }

    pub async fn patch(&self, path: &str, body: Value) -> Result<Value> {
        self.execute(Method::PATCH, path, RequestOptions::new().json(body))
            .await
    }
}

/// Classify a raw response.
///
/// - status >= 400 → `ApiError::Status` with the raw body text
/// - empty body → empty object
/// - otherwise JSON; `null` becomes an empty object, parse failure is
///   `ApiError::Parse`
pub fn parse_response(response: &TransportResponse) -> Result<Value> {
    if response.status >= 400 {
        return Err(ApiError::Status {
            status: response.status,
            body: response.text(),
        }
        .into());
    }

    if response.body.is_empty() {
        return Ok(empty());
    }

    let value: Value = serde_json::from_slice(&response.body).map_err(ApiError::Parse)?;
    Ok(if value.is_null() { empty() } else { value })
}

/// Render present parameters as `?a=x&b=y`; empty string when none remain.
pub fn build_query_string(params: &[(&str, Option<String>)]) -> String {
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    let mut any = false;
    for (name, value) in params {
        if let Some(value) = value {
            serializer.append_pair(name, value);
            any = true;
        }
    }
    if any {
        format!("?{}", serializer.finish())
    } else {
        String::new()
    }
}

/// Opaque pagination passthrough.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageRequest {
    pub page_size: Option<u32>,
    pub page_token: Option<String>,
}

impl PageRequest {
    pub fn new(page_size: u32) -> Self {
        Self {
            page_size: Some(page_size),
            page_token: None,
        }
    }

    pub fn with_token(mut self, page_token: impl Into<String>) -> Self {
        self.page_token = Some(page_token.into());
        self
    }

    pub(crate) fn params(&self) -> [(&'static str, Option<String>); 2] {
        [
            ("pageSize", self.page_size.map(|n| n.to_string())),
            ("pageToken", self.page_token.clone()),
        ]
    }
}

/// Fail with `Error::Validation` when `value` is empty or whitespace.
pub(crate) fn require(value: &str, message: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::Validation(message.to_string()));
    }
    Ok(())
}

/// Update payloads must be non-empty JSON objects. Returns the field names
/// for use as an `updateMask`, in sorted order (`serde_json::Map` does not
/// keep insertion order) rather than the order the caller wrote them.
pub(crate) fn require_update(data: &Value) -> Result<Vec<String>> {
    match data.as_object() {
        Some(fields) if !fields.is_empty() => Ok(fields.keys().cloned().collect()),
        _ => Err(Error::Validation("Update data cannot be empty".into())),
    }
}

/// Serialize a typed request payload into a JSON body.
pub(crate) fn to_body<T: serde::Serialize>(payload: &T) -> Result<Value> {
    serde_json::to_value(payload).map_err(|e| ApiError::Parse(e).into())
}

fn empty() -> Value {
    Value::Object(Map::new())
}
