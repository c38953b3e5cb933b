//! Yandex Cloud control-plane client
//!
//! Typed access to the organization-manager, resource-manager and IAM REST
//! APIs. Every call goes through a [`Dispatcher`], which obtains an IAM token
//! from the shared [`CredentialManager`](yandex_auth::CredentialManager),
//! attaches it as a bearer header and decodes the JSON response.
//!
//! ```no_run
//! # async fn run() -> yandex_cloud::Result<()> {
//! use yandex_cloud::{ClientSettings, PageRequest, YandexCloudClient};
//!
//! let client = YandexCloudClient::new("y0_...", ClientSettings::default())?;
//! let clouds = client.clouds().list(None, &PageRequest::default()).await?;
//! println!("{clouds}");
//! # Ok(())
//! # }
//! ```

mod client;
pub mod dispatch;
mod error;
pub mod metrics;
pub mod resources;
mod settings;

pub use client::YandexCloudClient;
pub use dispatch::{
    Dispatcher, PageRequest, RequestOptions, build_query_string, parse_response,
};
pub use error::{ApiError, Error, Result};
pub use resources::*;
pub use settings::{
    ClientSettings, Endpoints, IAM_BASE_URL, ORGANIZATION_MANAGER_BASE_URL,
    RESOURCE_MANAGER_BASE_URL,
};
pub use transport::HttpSettings;
