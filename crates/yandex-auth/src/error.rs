//! Authentication errors

/// Failures while obtaining an IAM token. All of them are fatal to the call
/// in progress; nothing here is retried automatically.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("OAuth token cannot be empty")]
    EmptyOAuthToken,

    #[error("failed to get IAM token (HTTP {status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("invalid IAM token response: {0}")]
    MalformedResponse(String),

    #[error("error getting IAM token: {0}")]
    Transport(#[source] transport::Error),
}

impl Error {
    /// HTTP status of a rejected exchange.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result alias for auth operations.
pub type Result<T> = std::result::Result<T, Error>;
