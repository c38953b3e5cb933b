//! API keys of service accounts (IAM host)

use serde::Serialize;
use serde_json::Value;
use transport::Method;

use crate::dispatch::{
    Dispatcher, PageRequest, RequestOptions, build_query_string, require, require_update, to_body,
};
use crate::error::Result;

const COLLECTION: &str = "iam/v1/apiKeys";
const ID_REQUIRED: &str = "API key ID is required";
const SERVICE_ACCOUNT_REQUIRED: &str = "Service account ID is required";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateApiKey {
    pub service_account_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    /// RFC 3339 timestamp.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<String>,
}

impl CreateApiKey {
    pub fn new(service_account_id: impl Into<String>) -> Self {
        Self {
            service_account_id: service_account_id.into(),
            description: None,
            scope: None,
            expires_at: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ApiKeys {
    dispatcher: Dispatcher,
}

impl ApiKeys {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self { dispatcher }
    }

    pub async fn list(&self, service_account_id: &str, page: &PageRequest) -> Result<Value> {
        require(service_account_id, SERVICE_ACCOUNT_REQUIRED)?;
        let [page_size, page_token] = page.params();
        let query = build_query_string(&[
            ("serviceAccountId", Some(service_account_id.to_string())),
            page_size,
            page_token,
        ]);
        self.dispatcher.get(&format!("{COLLECTION}{query}")).await
    }

    pub async fn get(&self, api_key_id: &str) -> Result<Value> {
        require(api_key_id, ID_REQUIRED)?;
        self.dispatcher
            .get(&format!("{COLLECTION}/{api_key_id}"))
            .await
    }

    /// The secret part of the key is only present in this response.
    pub async fn create(&self, request: &CreateApiKey) -> Result<Value> {
        require(&request.service_account_id, SERVICE_ACCOUNT_REQUIRED)?;
        self.dispatcher
            .post(COLLECTION, Some(to_body(request)?))
            .await
    }

    pub async fn update(&self, api_key_id: &str, data: Value) -> Result<Value> {
        require(api_key_id, ID_REQUIRED)?;
        let mask = require_update(&data)?.join(",");
        self.dispatcher
            .execute(
                Method::PATCH,
                &format!("{COLLECTION}/{api_key_id}"),
                RequestOptions::new().json(data).query("updateMask", mask),
            )
            .await
    }

    pub async fn delete(&self, api_key_id: &str) -> Result<Value> {
        require(api_key_id, ID_REQUIRED)?;
        self.dispatcher
            .delete(&format!("{COLLECTION}/{api_key_id}"))
            .await
    }

    pub async fn list_operations(&self, api_key_id: &str, page: &PageRequest) -> Result<Value> {
        require(api_key_id, ID_REQUIRED)?;
        let query = build_query_string(&page.params());
        self.dispatcher
            .get(&format!("{COLLECTION}/{api_key_id}/operations{query}"))
            .await
    }
}
