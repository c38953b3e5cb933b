//! Refresh tokens issued to the calling account (IAM host)

use serde_json::Value;

use crate::dispatch::{Dispatcher, PageRequest, build_query_string, require};
use crate::error::Result;

const COLLECTION: &str = "iam/v1/refreshTokens";

#[derive(Debug, Clone)]
pub struct RefreshTokens {
    dispatcher: Dispatcher,
}

impl RefreshTokens {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self { dispatcher }
    }

    pub async fn list(&self, page: &PageRequest) -> Result<Value> {
        let query = build_query_string(&page.params());
        self.dispatcher.get(&format!("{COLLECTION}{query}")).await
    }

    pub async fn revoke(&self, refresh_token_id: &str) -> Result<Value> {
        require(refresh_token_id, "Refresh token ID cannot be empty")?;
        self.dispatcher
            .post(&format!("{COLLECTION}/{refresh_token_id}:revoke"), None)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::tests::dispatcher_for;
    use crate::error::Error;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn revoke_posts_action_without_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/iam/v1/refreshTokens/rt1:revoke"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": "op"})))
            .expect(1)
            .mount(&server)
            .await;

        let tokens = RefreshTokens::new(dispatcher_for(&server, "t").await);
        tokens.revoke("rt1").await.unwrap();

        let requests = server.received_requests().await.unwrap();
        let revoke = requests
            .iter()
            .find(|r| r.url.path().ends_with(":revoke"))
            .unwrap();
        assert!(revoke.body.is_empty());
    }

    #[tokio::test]
    async fn revoke_requires_id() {
        let server = MockServer::start().await;
        let tokens = RefreshTokens::new(dispatcher_for(&server, "t").await);
        assert!(matches!(
            tokens.revoke("").await.unwrap_err(),
            Error::Validation(_)
        ));
    }

    #[tokio::test]
    async fn list_without_paging_has_no_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/iam/v1/refreshTokens"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"refreshTokens": []})))
            .expect(1)
            .mount(&server)
            .await;

        let tokens = RefreshTokens::new(dispatcher_for(&server, "t").await);
        tokens.list(&PageRequest::default()).await.unwrap();

        let requests = server.received_requests().await.unwrap();
        let list = requests
            .iter()
            .find(|r| r.url.path() == "/iam/v1/refreshTokens")
            .unwrap();
        assert_eq!(list.url.query(), None);
    }
}
