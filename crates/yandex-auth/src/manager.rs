//! IAM token lifecycle: cache, proactive refresh, invalidation
//!
//! The manager owns the OAuth token and at most one cached IAM token with
//! its local expiry instant. A cached token is served until
//! `issued_at + 12h - 5m`; after that (or after `invalidate_cache`) the next
//! `get_valid_token` performs a fresh exchange.
//!
//! States: Uncached → Cached(valid) → Cached(expired) → Cached(valid) …
//! Expiry is not an event, it is evaluated against the clock at query time.
//! A failed refresh leaves whatever was cached before untouched.
//!
//! Concurrency: reads of a valid cache take only the read lock. Refreshes
//! are single-flight: callers that find the cache stale queue on
//! `refresh_lock`, and every caller after the first re-checks the cache
//! before exchanging, so N concurrent stale reads cost one round-trip.

use std::sync::Arc;
use std::time::Instant;

use common::Secret;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};
use transport::Transport;

use crate::clock::{Clock, SystemClock};
use crate::constants::{IAM_TOKEN_ENDPOINT, effective_token_ttl};
use crate::error::{Error, Result};
use crate::token::exchange_oauth_token;

/// Cached IAM token. Value and expiry are written together under one lock,
/// so readers never see one without the other.
#[derive(Clone)]
struct CachedToken {
    value: Secret<String>,
    expires_at: Instant,
}

/// Converts a long-lived OAuth token into short-lived IAM tokens on demand.
pub struct CredentialManager {
    oauth_token: Secret<String>,
    transport: Arc<dyn Transport>,
    endpoint: String,
    clock: Arc<dyn Clock>,
    cached: RwLock<Option<CachedToken>>,
    refresh_lock: Mutex<()>,
}

impl std::fmt::Debug for CredentialManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialManager")
            .field("oauth_token", &self.oauth_token)
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl CredentialManager {
    /// Create a manager with an empty cache.
    ///
    /// Fails with `EmptyOAuthToken` if the token is empty or whitespace-only.
    pub fn new(oauth_token: impl Into<String>, transport: Arc<dyn Transport>) -> Result<Self> {
        let oauth_token = Secret::new(oauth_token.into());
        if oauth_token.is_blank() {
            return Err(Error::EmptyOAuthToken);
        }
        Ok(Self {
            oauth_token,
            transport,
            endpoint: IAM_TOKEN_ENDPOINT.to_string(),
            clock: Arc::new(SystemClock),
            cached: RwLock::new(None),
            refresh_lock: Mutex::new(()),
        })
    }

    /// Override the token exchange endpoint (test servers, private installations).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// The long-lived OAuth token this manager exchanges.
    pub fn oauth_token(&self) -> &Secret<String> {
        &self.oauth_token
    }

    /// Return a currently valid IAM token, exchanging the OAuth token first
    /// when nothing is cached or the cached token has reached its expiry.
    pub async fn get_valid_token(&self) -> Result<String> {
        if let Some(token) = self.cached_if_valid().await {
            return Ok(token);
        }

        let _guard = self.refresh_lock.lock().await;

        // Another caller may have refreshed while we waited for the lock
        if let Some(token) = self.cached_if_valid().await {
            debug!("IAM token refreshed by concurrent caller");
            return Ok(token);
        }

        self.refresh().await
    }

    /// Drop the cached token so the next `get_valid_token` exchanges again.
    pub async fn invalidate_cache(&self) {
        let previous = self.cached.write().await.take();
        if previous.is_some() {
            debug!("IAM token cache invalidated");
        }
    }

    /// Whether a cached token exists and is still inside its validity window.
    /// Never touches the network.
    pub async fn has_valid_cached_token(&self) -> bool {
        self.cached_if_valid().await.is_some()
    }

    /// Local expiry instant of the cached token, if any.
    pub async fn expires_at(&self) -> Option<Instant> {
        self.cached.read().await.as_ref().map(|c| c.expires_at)
    }

    async fn cached_if_valid(&self) -> Option<String> {
        let cached = self.cached.read().await;
        let now = self.clock.now();
        cached
            .as_ref()
            .filter(|c| now < c.expires_at)
            .map(|c| c.value.expose().clone())
    }

    /// Exchange the OAuth token and replace the cache. Caller holds `refresh_lock`.
    async fn refresh(&self) -> Result<String> {
        debug!(endpoint = %self.endpoint, "refreshing IAM token");

        let response = match exchange_oauth_token(
            self.transport.as_ref(),
            &self.endpoint,
            self.oauth_token.expose(),
        )
        .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "IAM token refresh failed");
                metrics::counter!("yandex_iam_token_refresh_total", "outcome" => "failure")
                    .increment(1);
                return Err(e);
            }
        };

        let issued_at = self.clock.now();
        let expires_at = issued_at + effective_token_ttl();
        let value = response.iam_token;
        *self.cached.write().await = Some(CachedToken {
            value: Secret::new(value.clone()),
            expires_at,
        });

        metrics::counter!("yandex_iam_token_refresh_total", "outcome" => "success").increment(1);
        info!(
            server_expires_at = response.expires_at.as_deref().unwrap_or("unknown"),
            valid_for_secs = effective_token_ttl().as_secs(),
            "IAM token refreshed"
        );
        Ok(value)
    }
}
