//! Error taxonomy for resource operations
//!
//! Three kinds, each propagated to the caller unchanged:
//! - `Authentication`: the IAM token could not be obtained
//! - `Validation`: a required argument was empty, no request was sent
//! - `Api`: the request went out and failed (status >= 400, bad JSON,
//!   transport failure)

/// Failures of a request that reached (or tried to reach) the API.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("API request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to parse JSON response: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("HTTP request failed: {0}")]
    Transport(#[source] transport::Error),
}

impl ApiError {
    /// HTTP status, when the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Raw response body of a failed call.
    pub fn body(&self) -> Option<&str> {
        match self {
            ApiError::Status { body, .. } => Some(body),
            _ => None,
        }
    }
}

/// Errors returned by every resource operation.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("authentication failed: {0}")]
    Authentication(#[from] yandex_auth::Error),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error(transparent)]
    Api(#[from] ApiError),
}

impl Error {
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api(api) => api.status(),
            Error::Authentication(auth) => auth.status(),
            Error::Validation(_) => None,
        }
    }
}

/// Result alias for client operations.
pub type Result<T> = std::result::Result<T, Error>;
