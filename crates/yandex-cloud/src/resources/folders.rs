//! Folders (resource-manager host)

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use super::access_bindings::{AccessBinding, AccessBindingDelta, AccessBindingOps, SubjectType};
use crate::dispatch::{
    Dispatcher, PageRequest, build_query_string, require, require_update, to_body,
};
use crate::error::Result;

const COLLECTION: &str = "resource-manager/v1/folders";
const ID_REQUIRED: &str = "Folder ID cannot be empty";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFolder {
    pub cloud_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<BTreeMap<String, String>>,
}

impl CreateFolder {
    pub fn new(cloud_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            cloud_id: cloud_id.into(),
            name: name.into(),
            description: None,
            labels: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Folders {
    dispatcher: Dispatcher,
    bindings: AccessBindingOps,
}

impl Folders {
    pub fn new(dispatcher: Dispatcher) -> Self {
        let bindings = AccessBindingOps::new(dispatcher.clone(), COLLECTION, ID_REQUIRED);
        Self {
            dispatcher,
            bindings,
        }
    }

    /// List folders of a cloud. `cloud_id` is required by the API.
    pub async fn list(&self, cloud_id: &str, page: &PageRequest) -> Result<Value> {
        require(cloud_id, "Cloud ID cannot be empty")?;
        let [page_size, page_token] = page.params();
        let query = build_query_string(&[
            ("cloudId", Some(cloud_id.to_string())),
            page_size,
            page_token,
        ]);
        self.dispatcher.get(&format!("{COLLECTION}{query}")).await
    }

    pub async fn get(&self, folder_id: &str) -> Result<Value> {
        require(folder_id, ID_REQUIRED)?;
        self.dispatcher.get(&format!("{COLLECTION}/{folder_id}")).await
    }

    pub async fn create(&self, request: &CreateFolder) -> Result<Value> {
        require(&request.cloud_id, "Cloud ID cannot be empty")?;
        require(&request.name, "Folder name cannot be empty")?;
        self.dispatcher
            .post(COLLECTION, Some(to_body(request)?))
            .await
    }

    pub async fn update(&self, folder_id: &str, data: Value) -> Result<Value> {
        require(folder_id, ID_REQUIRED)?;
        require_update(&data)?;
        self.dispatcher
            .patch(&format!("{COLLECTION}/{folder_id}"), data)
            .await
    }

    pub async fn delete(&self, folder_id: &str) -> Result<Value> {
        require(folder_id, ID_REQUIRED)?;
        self.dispatcher
            .delete(&format!("{COLLECTION}/{folder_id}"))
            .await
    }

    pub async fn list_operations(&self, folder_id: &str, page: &PageRequest) -> Result<Value> {
        require(folder_id, ID_REQUIRED)?;
        let query = build_query_string(&page.params());
        self.dispatcher
            .get(&format!("{COLLECTION}/{folder_id}/operations{query}"))
            .await
    }

    pub async fn list_access_bindings(&self, folder_id: &str, page: &PageRequest) -> Result<Value> {
        self.bindings.list(folder_id, page).await
    }

    pub async fn set_access_bindings(&self, folder_id: &str, bindings: &[AccessBinding]) -> Result<Value> {
        self.bindings.set(folder_id, bindings).await
    }

    pub async fn update_access_bindings(&self, folder_id: &str, deltas: &[AccessBindingDelta]) -> Result<Value> {
        self.bindings.update(folder_id, deltas).await
    }

    pub async fn add_role(
        &self,
        folder_id: &str,
        subject_id: &str,
        role_id: &str,
        subject_type: SubjectType,
    ) -> Result<Value> {
        self.bindings
            .add_role(folder_id, AccessBinding::new(role_id, subject_id, subject_type))
            .await
    }

    pub async fn remove_role(
        &self,
        folder_id: &str,
        subject_id: &str,
        role_id: &str,
        subject_type: SubjectType,
    ) -> Result<Value> {
        self.bindings
            .remove_role(folder_id, AccessBinding::new(role_id, subject_id, subject_type))
            .await
    }
}
