//! IAM token exchange constants

use std::time::Duration;

/// IAM endpoint that exchanges a Yandex Passport OAuth token for an IAM token.
pub const IAM_TOKEN_ENDPOINT: &str = "https://iam.api.cloud.yandex.net/iam/v1/tokens";

/// Nominal lifetime of an IAM token issued by the exchange.
pub const IAM_TOKEN_LIFETIME: Duration = Duration::from_secs(12 * 60 * 60);

/// Subtracted from the lifetime so a cached token is replaced before the
/// server stops accepting it.
pub const IAM_TOKEN_REFRESH_MARGIN: Duration = Duration::from_secs(5 * 60);

/// How long a freshly issued token is served from cache (11h55m).
pub const fn effective_token_ttl() -> Duration {
    IAM_TOKEN_LIFETIME.saturating_sub(IAM_TOKEN_REFRESH_MARGIN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn effective_ttl_is_eleven_hours_fifty_five_minutes() {
        assert_eq!(effective_token_ttl(), Duration::from_secs(11 * 3600 + 55 * 60));
    }

    #[test]
    fn endpoint_is_the_iam_tokens_resource() {
        assert_eq!(
            IAM_TOKEN_ENDPOINT,
            "https://iam.api.cloud.yandex.net/iam/v1/tokens"
        );
    }
}
