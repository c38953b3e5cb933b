//! Command execution

use anyhow::{Context, Result};
use serde_json::Value;
use yandex_cloud::{PageRequest, YandexCloudClient};

use crate::cli::{
    CloudsCommand, Command, FoldersCommand, OrganizationsCommand, PassportAccountsCommand,
    ServiceAccountsCommand, UserAccountsCommand,
};
use crate::config::Config;

fn scope(explicit: Option<String>, configured: &Option<String>, what: &str) -> Result<String> {
    explicit
        .or_else(|| configured.clone())
        .with_context(|| format!("{what} not given as an argument and no default configured"))
}

/// Run one command. Returns the JSON value to print.
pub async fn run(command: Command, client: &YandexCloudClient, config: &Config) -> Result<Value> {
    let page = PageRequest::default();
    let value = match command {
        Command::Token => {
            let token = client.credentials().get_valid_token().await?;
            serde_json::json!({ "iamToken": token })
        }
        Command::Organizations(OrganizationsCommand::List) => {
            client.organizations().list(&page).await?
        }
        Command::Clouds(CloudsCommand::List { organization_id }) => {
            // organizationId is optional for this call; without it every
            // accessible cloud is listed.
            let organization_id = organization_id.or_else(|| config.organization_id.clone());
            client
                .clouds()
                .list(organization_id.as_deref(), &page)
                .await?
        }
        Command::Folders(FoldersCommand::List { cloud_id }) => {
            let cloud_id = scope(cloud_id, &config.cloud_id, "cloud id")?;
            client.folders().list(&cloud_id, &page).await?
        }
        Command::ServiceAccounts(ServiceAccountsCommand::List { folder_id }) => {
            let folder_id = scope(folder_id, &config.folder_id, "folder id")?;
            client
                .service_accounts()
                .list(&folder_id, &page, None)
                .await?
        }
        Command::UserAccounts(UserAccountsCommand::Get { id }) => {
            client.user_accounts().get(&id).await?
        }
        Command::PassportAccounts(PassportAccountsCommand::Get { login }) => {
            client
                .yandex_passport_user_accounts()
                .get_by_login(&login)
                .await?
        }
    };
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};
    use yandex_cloud::{ClientSettings, Endpoints};

    async fn client_for(server: &MockServer) -> YandexCloudClient {
        Mock::given(method("POST"))
            .and(path("/iam/v1/tokens"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"iamToken": "iam-cli"})),
            )
            .mount(server)
            .await;
        let settings = ClientSettings {
            endpoints: Endpoints::single_host(&server.uri()),
            ..ClientSettings::default()
        };
        YandexCloudClient::new("y0_oauth", settings).unwrap()
    }

    #[tokio::test]
    async fn token_command_prints_iam_token() {
        let server = MockServer::start().await;
        let client = client_for(&server).await;
        let value = run(Command::Token, &client, &Config::default()).await.unwrap();
        assert_eq!(value["iamToken"], "iam-cli");
    }

    #[tokio::test]
    async fn folders_fall_back_to_configured_cloud() {
        let server = MockServer::start().await;
        let client = client_for(&server).await;
        Mock::given(method("GET"))
            .and(path("/resource-manager/v1/folders"))
            .and(query_param("cloudId", "b1g-default"))
            .and(header("authorization", "Bearer iam-cli"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"folders": []})))
            .expect(1)
            .mount(&server)
            .await;

        let config = Config {
            cloud_id: Some("b1g-default".into()),
            ..Config::default()
        };
        run(
            Command::Folders(FoldersCommand::List { cloud_id: None }),
            &client,
            &config,
        )
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn missing_scope_without_default_fails() {
        let server = MockServer::start().await;
        let client = client_for(&server).await;
        let err = run(
            Command::ServiceAccounts(ServiceAccountsCommand::List { folder_id: None }),
            &client,
            &Config::default(),
        )
        .await
        .unwrap_err();
        assert!(err.to_string().contains("folder id not given"));
    }
}
