//! Clouds (resource-manager host)

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use super::access_bindings::{AccessBinding, AccessBindingDelta, AccessBindingOps, SubjectType};
use crate::dispatch::{Dispatcher, PageRequest, build_query_string, require, require_update, to_body};
use crate::error::Result;

const COLLECTION: &str = "resource-manager/v1/clouds";
const ID_REQUIRED: &str = "Cloud ID cannot be empty";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCloud {
    pub organization_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<BTreeMap<String, String>>,
}

impl CreateCloud {
    pub fn new(organization_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            organization_id: organization_id.into(),
            name: name.into(),
            description: None,
            labels: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Clouds {
    dispatcher: Dispatcher,
    bindings: AccessBindingOps,
}

impl Clouds {
    pub fn new(dispatcher: Dispatcher) -> Self {
        let bindings = AccessBindingOps::new(dispatcher.clone(), COLLECTION, ID_REQUIRED);
        Self {
            dispatcher,
            bindings,
        }
    }

    /// List clouds, optionally restricted to one organization.
    pub async fn list(&self, organization_id: Option<&str>, page: &PageRequest) -> Result<Value> {
        let [page_size, page_token] = page.params();
        let query = build_query_string(&[
            ("organizationId", organization_id.map(str::to_string)),
            page_size,
            page_token,
        ]);
        self.dispatcher.get(&format!("{COLLECTION}{query}")).await
    }

    pub async fn get(&self, cloud_id: &str) -> Result<Value> {
        require(cloud_id, ID_REQUIRED)?;
        self.dispatcher.get(&format!("{COLLECTION}/{cloud_id}")).await
    }

    pub async fn create(&self, request: &CreateCloud) -> Result<Value> {
        require(&request.organization_id, "Organization ID cannot be empty")?;
        require(&request.name, "Cloud name cannot be empty")?;
        let body = to_body(request)?;
        self.dispatcher.post(COLLECTION, Some(body)).await
    }

    pub async fn update(&self, cloud_id: &str, data: Value) -> Result<Value> {
        require(cloud_id, ID_REQUIRED)?;
        require_update(&data)?;
        self.dispatcher
            .patch(&format!("{COLLECTION}/{cloud_id}"), data)
            .await
    }

    pub async fn delete(&self, cloud_id: &str) -> Result<Value> {
        require(cloud_id, ID_REQUIRED)?;
        self.dispatcher
            .delete(&format!("{COLLECTION}/{cloud_id}"))
            .await
    }

    pub async fn list_access_bindings(&self, cloud_id: &str, page: &PageRequest) -> Result<Value> {
        self.bindings.list(cloud_id, page).await
    }

    pub async fn set_access_bindings(&self, cloud_id: &str, bindings: &[AccessBinding]) -> Result<Value> {
        self.bindings.set(cloud_id, bindings).await
    }

    pub async fn update_access_bindings(&self, cloud_id: &str, deltas: &[AccessBindingDelta]) -> Result<Value> {
        self.bindings.update(cloud_id, deltas).await
    }

    pub async fn add_role(
        &self,
        cloud_id: &str,
        subject_id: &str,
        role_id: &str,
        subject_type: SubjectType,
    ) -> Result<Value> {
        self.bindings
            .add_role(cloud_id, AccessBinding::new(role_id, subject_id, subject_type))
            .await
    }

    pub async fn remove_role(
        &self,
        cloud_id: &str,
        subject_id: &str,
        role_id: &str,
        subject_type: SubjectType,
    ) -> Result<Value> {
        self.bindings
            .remove_role(cloud_id, AccessBinding::new(role_id, subject_id, subject_type))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::tests::dispatcher_for;
    use crate::error::Error;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn list_filters_by_organization() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/resource-manager/v1/clouds"))
            .and(query_param("organizationId", "bpf1"))
            .and(query_param("pageSize", "5"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"clouds": []})))
            .expect(1)
            .mount(&server)
            .await;

        let clouds = Clouds::new(dispatcher_for(&server, "t").await);
        clouds.list(Some("bpf1"), &PageRequest::new(5)).await.unwrap();
    }

    #[tokio::test]
    async fn create_omits_absent_optionals() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/resource-manager/v1/clouds"))
            .and(body_json(serde_json::json!({"organizationId": "bpf1", "name": "prod"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": "op1"})))
            .expect(1)
            .mount(&server)
            .await;

        let clouds = Clouds::new(dispatcher_for(&server, "t").await);
        let op = clouds.create(&CreateCloud::new("bpf1", "prod")).await.unwrap();
        assert_eq!(op["id"], "op1");
    }

    #[tokio::test]
    async fn create_includes_labels_and_description() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/resource-manager/v1/clouds"))
            .and(body_json(serde_json::json!({
                "organizationId": "bpf1",
                "name": "prod",
                "description": "production",
                "labels": {"env": "prod"}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": "op2"})))
            .expect(1)
            .mount(&server)
            .await;

        let clouds = Clouds::new(dispatcher_for(&server, "t").await);
        let mut request = CreateCloud::new("bpf1", "prod");
        request.description = Some("production".into());
        request.labels = Some(BTreeMap::from([("env".to_string(), "prod".to_string())]));
        clouds.create(&request).await.unwrap();
    }

    #[tokio::test]
    async fn create_validates_name() {
        let server = MockServer::start().await;
        let clouds = Clouds::new(dispatcher_for(&server, "t").await);
        let err = clouds.create(&CreateCloud::new("bpf1", "")).await.unwrap_err();
        assert!(matches!(err, Error::Validation(ref m) if m == "Cloud name cannot be empty"));
    }

    #[tokio::test]
    async fn delete_conflict_surfaces_status() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/resource-manager/v1/clouds/b1g"))
            .respond_with(ResponseTemplate::new(409).set_body_string("cloud has folders"))
            .mount(&server)
            .await;

        let clouds = Clouds::new(dispatcher_for(&server, "t").await);
        let err = clouds.delete("b1g").await.unwrap_err();
        assert_eq!(err.status(), Some(409));
    }
}
