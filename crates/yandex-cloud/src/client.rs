//! Client facade: one credential manager and transport behind every resource group

use std::sync::Arc;

use transport::{ReqwestTransport, Transport};
use yandex_auth::CredentialManager;

use crate::dispatch::Dispatcher;
use crate::error::{ApiError, Result};
use crate::resources::{
    ApiKeys, Clouds, Folders, Organizations, RefreshTokens, ServiceAccounts, UserAccounts,
    YandexPassportUserAccounts,
};
use crate::settings::{ClientSettings, Endpoints};

/// Entry point for the control-plane APIs.
///
/// Resource groups are built on demand and share the same credential
/// manager, so one IAM token serves every host.
#[derive(Clone)]
pub struct YandexCloudClient {
    credentials: Arc<CredentialManager>,
    transport: Arc<dyn Transport>,
    endpoints: Endpoints,
}

impl std::fmt::Debug for YandexCloudClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YandexCloudClient")
            .field("credentials", &self.credentials)
            .field("endpoints", &self.endpoints)
            .finish_non_exhaustive()
    }
}

impl YandexCloudClient {
    /// Build a client over a reqwest transport.
    ///
    /// Fails if the OAuth token is blank or the HTTP client cannot be built.
    pub fn new(oauth_token: impl Into<String>, settings: ClientSettings) -> Result<Self> {
        let transport: Arc<dyn Transport> =
            Arc::new(ReqwestTransport::new(&settings.http).map_err(ApiError::Transport)?);
        Self::with_transport(oauth_token, transport, settings.endpoints)
    }

    pub fn with_transport(
        oauth_token: impl Into<String>,
        transport: Arc<dyn Transport>,
        endpoints: Endpoints,
    ) -> Result<Self> {
        let credentials = Arc::new(
            CredentialManager::new(oauth_token, transport.clone())?
                .with_endpoint(endpoints.token.clone()),
        );
        Ok(Self {
            credentials,
            transport,
            endpoints,
        })
    }

    fn dispatcher(&self, base_url: &str) -> Dispatcher {
        Dispatcher::new(base_url, self.transport.clone(), self.credentials.clone())
    }

    pub fn organizations(&self) -> Organizations {
        Organizations::new(self.dispatcher(&self.endpoints.organization_manager))
    }

    pub fn clouds(&self) -> Clouds {
        Clouds::new(self.dispatcher(&self.endpoints.resource_manager))
    }

    pub fn folders(&self) -> Folders {
        Folders::new(self.dispatcher(&self.endpoints.resource_manager))
    }

    pub fn service_accounts(&self) -> ServiceAccounts {
        ServiceAccounts::new(self.dispatcher(&self.endpoints.iam))
    }

    pub fn api_keys(&self) -> ApiKeys {
        ApiKeys::new(self.dispatcher(&self.endpoints.iam))
    }

    pub fn refresh_tokens(&self) -> RefreshTokens {
        RefreshTokens::new(self.dispatcher(&self.endpoints.iam))
    }

    pub fn user_accounts(&self) -> UserAccounts {
        UserAccounts::new(self.dispatcher(&self.endpoints.iam))
    }

    pub fn yandex_passport_user_accounts(&self) -> YandexPassportUserAccounts {
        YandexPassportUserAccounts::new(self.dispatcher(&self.endpoints.iam))
    }

    /// The shared credential manager, e.g. to force a refresh with
    /// `invalidate_cache`.
    pub fn credentials(&self) -> &Arc<CredentialManager> {
        &self.credentials
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::PageRequest;
    use crate::error::Error;
    use crate::resources::SubjectType;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> YandexCloudClient {
        let settings = ClientSettings {
            endpoints: Endpoints::single_host(&server.uri()),
            ..ClientSettings::default()
        };
        YandexCloudClient::new("y0_oauth", settings).unwrap()
    }

    async fn mount_token(server: &MockServer, token: &str, times: u64) {
        Mock::given(method("POST"))
            .and(path("/iam/v1/tokens"))
            .and(body_json(serde_json::json!({"yandexPassportOauthToken": "y0_oauth"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "iamToken": token,
                "expiresAt": "2026-10-20T06:00:00Z"
            })))
            .expect(times)
            .mount(server)
            .await;
    }

    #[test]
    fn blank_oauth_token_is_rejected() {
        let err = YandexCloudClient::new("  ", ClientSettings::default()).unwrap_err();
        assert!(matches!(
            err,
            Error::Authentication(yandex_auth::Error::EmptyOAuthToken)
        ));
    }

    #[test]
    fn token_endpoint_follows_settings() {
        let client = YandexCloudClient::new(
            "y0_oauth",
            ClientSettings {
                endpoints: Endpoints::single_host("http://127.0.0.1:9"),
                ..ClientSettings::default()
            },
        )
        .unwrap();
        assert_eq!(client.credentials().endpoint(), "http://127.0.0.1:9/iam/v1/tokens");
    }

    #[tokio::test]
    async fn one_token_serves_every_resource_group() {
        let server = MockServer::start().await;
        mount_token(&server, "iam-shared", 1).await;

        Mock::given(method("GET"))
            .and(path("/organization-manager/v1/organizations"))
            .and(header("authorization", "Bearer iam-shared"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "organizations": [{"id": "bpf1"}]
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/resource-manager/v1/clouds"))
            .and(query_param("organizationId", "bpf1"))
            .and(header("authorization", "Bearer iam-shared"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "clouds": [{"id": "b1g"}]
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/resource-manager/v1/folders"))
            .and(query_param("cloudId", "b1g"))
            .and(header("authorization", "Bearer iam-shared"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "folders": [{"id": "b1f"}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let page = PageRequest::default();
        let orgs = client.organizations().list(&page).await.unwrap();
        let org_id = orgs["organizations"][0]["id"].as_str().unwrap();
        let clouds = client.clouds().list(Some(org_id), &page).await.unwrap();
        let cloud_id = clouds["clouds"][0]["id"].as_str().unwrap();
        let folders = client.folders().list(cloud_id, &page).await.unwrap();
        assert_eq!(folders["folders"][0]["id"], "b1f");
        assert!(client.credentials().has_valid_cached_token().await);
    }

    #[tokio::test]
    async fn invalidate_forces_new_exchange() {
        let server = MockServer::start().await;
        mount_token(&server, "iam-1", 2).await;
        Mock::given(method("GET"))
            .and(path("/iam/v1/refreshTokens"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .expect(2)
            .mount(&server)
            .await;

        let client = client_for(&server);
        client.refresh_tokens().list(&PageRequest::default()).await.unwrap();
        client.credentials().invalidate_cache().await;
        assert!(!client.credentials().has_valid_cached_token().await);
        client.refresh_tokens().list(&PageRequest::default()).await.unwrap();
    }

    #[tokio::test]
    async fn rejected_exchange_surfaces_as_authentication_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/iam/v1/tokens"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "message": "OAuth token is invalid"
            })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client
            .service_accounts()
            .add_role("aje1", "u1", "editor", SubjectType::UserAccount)
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(401));
        match err {
            Error::Authentication(yandex_auth::Error::Rejected { message, .. }) => {
                assert_eq!(message, "OAuth token is invalid")
            }
            other => panic!("expected rejected exchange, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn api_error_keeps_status_and_body() {
        let server = MockServer::start().await;
        mount_token(&server, "iam-1", 1).await;
        Mock::given(method("GET"))
            .and(path("/iam/v1/yandexPassportUserAccounts:byLogin"))
            .respond_with(
                ResponseTemplate::new(403).set_body_string(r#"{"code":7,"message":"Permission denied"}"#),
            )
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client
            .yandex_passport_user_accounts()
            .get_by_login("alice")
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(403));
        assert!(err.to_string().contains("Permission denied"));
    }
}
