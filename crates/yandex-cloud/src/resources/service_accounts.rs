//! Service accounts (IAM host)

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use super::access_bindings::{AccessBinding, AccessBindingDelta, AccessBindingOps, Subject, SubjectType};
use crate::dispatch::{
    Dispatcher, PageRequest, RequestOptions, build_query_string, require, require_update, to_body,
};
use crate::error::Result;
use transport::Method;

const COLLECTION: &str = "iam/v1/serviceAccounts";
const ID_REQUIRED: &str = "Service account ID is required";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateServiceAccount {
    pub folder_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<BTreeMap<String, String>>,
}

impl CreateServiceAccount {
    pub fn new(folder_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            folder_id: folder_id.into(),
            name: name.into(),
            description: None,
            labels: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServiceAccounts {
    dispatcher: Dispatcher,
    bindings: AccessBindingOps,
}

impl ServiceAccounts {
    pub fn new(dispatcher: Dispatcher) -> Self {
        let bindings = AccessBindingOps::new(dispatcher.clone(), COLLECTION, ID_REQUIRED);
        Self {
            dispatcher,
            bindings,
        }
    }

    pub async fn list(&self, folder_id: &str, page: &PageRequest, filter: Option<&str>) -> Result<Value> {
        require(folder_id, "Folder ID is required")?;
        let [page_size, page_token] = page.params();
        let query = build_query_string(&[
            ("folderId", Some(folder_id.to_string())),
            page_size,
            page_token,
            ("filter", filter.map(str::to_string)),
        ]);
        self.dispatcher.get(&format!("{COLLECTION}{query}")).await
    }

    pub async fn get(&self, service_account_id: &str) -> Result<Value> {
        require(service_account_id, ID_REQUIRED)?;
        self.dispatcher
            .get(&format!("{COLLECTION}/{service_account_id}"))
            .await
    }

    pub async fn create(&self, request: &CreateServiceAccount) -> Result<Value> {
        require(&request.folder_id, "Folder ID is required")?;
        require(&request.name, "Service account name is required")?;
        self.dispatcher
            .post(COLLECTION, Some(to_body(request)?))
            .await
    }

    /// PATCH with an `updateMask` naming every field present in `data`.
    pub async fn update(&self, service_account_id: &str, data: Value) -> Result<Value> {
        require(service_account_id, ID_REQUIRED)?;
        let mask = require_update(&data)?.join(",");
        self.dispatcher
            .execute(
                Method::PATCH,
                &format!("{COLLECTION}/{service_account_id}"),
                RequestOptions::new().json(data).query("updateMask", mask),
            )
            .await
    }

    pub async fn delete(&self, service_account_id: &str) -> Result<Value> {
        require(service_account_id, ID_REQUIRED)?;
        self.dispatcher
            .delete(&format!("{COLLECTION}/{service_account_id}"))
            .await
    }

    pub async fn list_operations(&self, service_account_id: &str, page: &PageRequest) -> Result<Value> {
        require(service_account_id, ID_REQUIRED)?;
        let query = build_query_string(&page.params());
        self.dispatcher
            .get(&format!("{COLLECTION}/{service_account_id}/operations{query}"))
            .await
    }

    pub async fn list_access_bindings(&self, service_account_id: &str, page: &PageRequest) -> Result<Value> {
        self.bindings.list(service_account_id, page).await
    }

    /// Replace all bindings on the account. An empty list is rejected with a
    /// validation error rather than clearing the bindings; remove roles
    /// individually with `remove_role` or `update_access_bindings`.
    pub async fn set_access_bindings(
        &self,
        service_account_id: &str,
        bindings: &[AccessBinding],
    ) -> Result<Value> {
        self.bindings.set(service_account_id, bindings).await
    }

    /// Apply ADD/REMOVE deltas. An empty delta list is a validation error.
    pub async fn update_access_bindings(
        &self,
        service_account_id: &str,
        deltas: &[AccessBindingDelta],
    ) -> Result<Value> {
        self.bindings.update(service_account_id, deltas).await
    }

    /// Grant `role_id` on this service account to another subject.
    pub async fn add_role(
        &self,
        service_account_id: &str,
        subject_id: &str,
        role_id: &str,
        subject_type: SubjectType,
    ) -> Result<Value> {
        self.bindings
            .add_role(service_account_id, AccessBinding::new(role_id, subject_id, subject_type))
            .await
    }

    /// Revoke a role. The subject is matched by id alone.
    pub async fn remove_role(&self, service_account_id: &str, subject_id: &str, role_id: &str) -> Result<Value> {
        let binding = AccessBinding {
            role_id: role_id.to_string(),
            subject: Subject {
                id: subject_id.to_string(),
                subject_type: None,
            },
        };
        self.bindings.remove_role(service_account_id, binding).await
    }
}
