//! Yandex Cloud IAM authentication
//!
//! Exchanges a Yandex Passport OAuth token for short-lived IAM tokens and
//! keeps the current one cached until shortly before it expires.
//!
//! Flow:
//! 1. Caller builds a `CredentialManager` with the OAuth token
//! 2. `CredentialManager::get_valid_token()` exchanges on first use via
//!    `token::exchange_oauth_token()`
//! 3. The IAM token is served from cache for 11h55m
//! 4. After that, or after `invalidate_cache()`, the next call exchanges again

pub mod clock;
pub mod constants;
pub mod error;
pub mod manager;
pub mod token;

pub use clock::{Clock, MockClock, SystemClock};
pub use constants::*;
pub use error::{Error, Result};
pub use manager::CredentialManager;
pub use token::{IamTokenResponse, exchange_oauth_token};
