//! Organizations (organization-manager host)

use serde_json::Value;

use super::access_bindings::{AccessBinding, AccessBindingDelta, AccessBindingOps, SubjectType};
use crate::dispatch::{Dispatcher, PageRequest, build_query_string, require, require_update};
use crate::error::Result;

const COLLECTION: &str = "organization-manager/v1/organizations";
const ID_REQUIRED: &str = "Organization ID cannot be empty";

#[derive(Debug, Clone)]
pub struct Organizations {
    dispatcher: Dispatcher,
    bindings: AccessBindingOps,
}

impl Organizations {
    pub fn new(dispatcher: Dispatcher) -> Self {
        let bindings = AccessBindingOps::new(dispatcher.clone(), COLLECTION, ID_REQUIRED);
        Self {
            dispatcher,
            bindings,
        }
    }

    pub async fn list(&self, page: &PageRequest) -> Result<Value> {
        let query = build_query_string(&page.params());
        self.dispatcher.get(&format!("{COLLECTION}{query}")).await
    }

    pub async fn get(&self, organization_id: &str) -> Result<Value> {
        require(organization_id, ID_REQUIRED)?;
        self.dispatcher
            .get(&format!("{COLLECTION}/{organization_id}"))
            .await
    }

    pub async fn update(&self, organization_id: &str, data: Value) -> Result<Value> {
        require(organization_id, ID_REQUIRED)?;
        require_update(&data)?;
        self.dispatcher
            .patch(&format!("{COLLECTION}/{organization_id}"), data)
            .await
    }

    pub async fn list_access_bindings(&self, organization_id: &str, page: &PageRequest) -> Result<Value> {
        self.bindings.list(organization_id, page).await
    }

    pub async fn set_access_bindings(&self, organization_id: &str, bindings: &[AccessBinding]) -> Result<Value> {
        self.bindings.set(organization_id, bindings).await
    }

    pub async fn update_access_bindings(
        &self,
        organization_id: &str,
        deltas: &[AccessBindingDelta],
    ) -> Result<Value> {
        self.bindings.update(organization_id, deltas).await
    }

    pub async fn add_role(
        &self,
        organization_id: &str,
        subject_id: &str,
        role_id: &str,
        subject_type: SubjectType,
    ) -> Result<Value> {
        self.bindings
            .add_role(organization_id, AccessBinding::new(role_id, subject_id, subject_type))
            .await
    }

    pub async fn remove_role(
        &self,
        organization_id: &str,
        subject_id: &str,
        role_id: &str,
        subject_type: SubjectType,
    ) -> Result<Value> {
        self.bindings
            .remove_role(organization_id, AccessBinding::new(role_id, subject_id, subject_type))
            .await
    }
}
