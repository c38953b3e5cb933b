//! OAuth → IAM token exchange
//!
//! One POST to the IAM tokens endpoint with the OAuth token as the only JSON
//! field. Any status other than 200 is a rejection; the server's `message`
//! field is surfaced when the error body parses.

use serde::{Deserialize, Serialize};
use transport::{Method, Transport, TransportRequest};

use crate::error::{Error, Result};

/// Request body for the exchange.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ExchangeRequest<'a> {
    yandex_passport_oauth_token: &'a str,
}

/// Successful exchange response.
///
/// The server also reports its own `expiresAt` timestamp. It is kept for
/// diagnostics; cache expiry is computed locally from the issuance instant.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IamTokenResponse {
    pub iam_token: String,
    #[serde(default)]
    pub expires_at: Option<String>,
}

/// Error body returned on rejected exchanges.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Exchange `oauth_token` for a fresh IAM token at `endpoint`.
pub async fn exchange_oauth_token(
    transport: &dyn Transport,
    endpoint: &str,
    oauth_token: &str,
) -> Result<IamTokenResponse> {
    let body = serde_json::to_value(ExchangeRequest {
        yandex_passport_oauth_token: oauth_token,
    })
    .map_err(|e| Error::MalformedResponse(format!("serializing exchange request: {e}")))?;

    let response = transport
        .send(TransportRequest::new(Method::POST, endpoint).with_json(body))
        .await
        .map_err(Error::Transport)?;

    if response.status != 200 {
        let message = serde_json::from_slice::<ErrorBody>(&response.body)
            .ok()
            .and_then(|b| b.message)
            .unwrap_or_else(|| "Unknown error".to_string());
        return Err(Error::Rejected {
            status: response.status,
            message,
        });
    }

    let value: serde_json::Value = serde_json::from_slice(&response.body)
        .map_err(|e| Error::MalformedResponse(format!("response is not JSON: {e}")))?;
    if value
        .get("iamToken")
        .and_then(|t| t.as_str())
        .filter(|t| !t.trim().is_empty())
        .is_none()
    {
        return Err(Error::MalformedResponse(
            "IAM token not found in response".into(),
        ));
    }
    serde_json::from_value(value).map_err(|e| Error::MalformedResponse(e.to_string()))
}
