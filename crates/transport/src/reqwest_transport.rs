//! reqwest-backed transport
//!
//! Every request carries JSON `Content-Type`/`Accept` defaults and the
//! configured connect/request timeouts. Caller headers override the defaults.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use reqwest::Url;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use tracing::debug;

use crate::{Error, Result, Transport, TransportRequest, TransportResponse};

/// Timeouts applied to every call made through a `ReqwestTransport`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpSettings {
    /// Whole-request timeout (connect + send + read).
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

/// Production transport built on a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(settings: &HttpSettings) -> Result<Self> {
        let mut defaults = HeaderMap::new();
        defaults.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        defaults.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .timeout(settings.timeout)
            .connect_timeout(settings.connect_timeout)
            .default_headers(defaults)
            .build()
            .map_err(|e| Error::Request(Box::new(e)))?;

        Ok(Self { client })
    }

    /// Wrap an existing client. Default headers and timeouts are whatever the
    /// client was built with.
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Transport for ReqwestTransport {
    fn send(
        &self,
        request: TransportRequest,
    ) -> Pin<Box<dyn Future<Output = Result<TransportResponse>> + Send + '_>> {
        Box::pin(async move {
            let url = build_url(&request.url, &request.query)?;
            debug!(method = %request.method, url = %url, "sending request");

            let mut builder = self
                .client
                .request(request.method, url)
                .headers(request.headers);
            if let Some(body) = &request.json {
                builder = builder.json(body);
            }

            let response = builder.send().await.map_err(classify)?;
            let status = response.status().as_u16();
            let body = response
                .bytes()
                .await
                .map_err(|e| Error::Body(Box::new(e)))?;

            debug!(status, bytes = body.len(), "response received");
            Ok(TransportResponse { status, body })
        })
    }
}

/// Parse `raw` and append `query` pairs with form-urlencoding.
fn build_url(raw: &str, query: &[(String, String)]) -> Result<Url> {
    let mut url = Url::parse(raw).map_err(|e| Error::InvalidUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;
    if !query.is_empty() {
        let mut pairs = url.query_pairs_mut();
        for (name, value) in query {
            pairs.append_pair(name, value);
        }
    }
    Ok(url)
}

fn classify(err: reqwest::Error) -> Error {
    if err.is_timeout() {
        Error::Timeout(Box::new(err))
    } else if err.is_connect() {
        Error::Connect(Box::new(err))
    } else {
        Error::Request(Box::new(err))
    }
}
