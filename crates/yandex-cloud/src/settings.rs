//! Client settings: API hosts and HTTP timeouts

use transport::HttpSettings;

pub const IAM_BASE_URL: &str = "https://iam.api.cloud.yandex.net/";
pub const ORGANIZATION_MANAGER_BASE_URL: &str = "https://organization-manager.api.cloud.yandex.net/";
pub const RESOURCE_MANAGER_BASE_URL: &str = "https://resource-manager.api.cloud.yandex.net/";

/// Base URLs of the API hosts plus the IAM token exchange endpoint.
///
/// Defaults are the public Yandex Cloud hosts. Base URLs end with `/`;
/// resource paths are joined onto them without a leading slash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub token: String,
    pub iam: String,
    pub organization_manager: String,
    pub resource_manager: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            token: yandex_auth::IAM_TOKEN_ENDPOINT.to_string(),
            iam: IAM_BASE_URL.to_string(),
            organization_manager: ORGANIZATION_MANAGER_BASE_URL.to_string(),
            resource_manager: RESOURCE_MANAGER_BASE_URL.to_string(),
        }
    }
}

impl Endpoints {
    /// Point every host at one base URL (mock servers, proxies).
    pub fn single_host(base_url: &str) -> Self {
        let base = format!("{}/", base_url.trim_end_matches('/'));
        Self {
            token: format!("{base}iam/v1/tokens"),
            iam: base.clone(),
            organization_manager: base.clone(),
            resource_manager: base,
        }
    }
}

/// Everything `YandexCloudClient::new` needs besides the OAuth token.
#[derive(Debug, Clone, Default)]
pub struct ClientSettings {
    pub http: HttpSettings,
    pub endpoints: Endpoints,
}
