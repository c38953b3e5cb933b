//! Access bindings: role ↔ subject associations on a resource
//!
//! Organizations, clouds, folders and service accounts expose the same
//! `:listAccessBindings` / `:setAccessBindings` / `:updateAccessBindings`
//! actions. `AccessBindingOps` implements them once for a collection path;
//! each resource group holds one and forwards to it.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::dispatch::{Dispatcher, PageRequest, build_query_string, require};
use crate::error::{Error, Result};

/// Kind of subject a role is granted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SubjectType {
    UserAccount,
    ServiceAccount,
    FederatedUser,
    Group,
    System,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub id: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub subject_type: Option<SubjectType>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessBinding {
    pub role_id: String,
    pub subject: Subject,
}

impl AccessBinding {
    pub fn new(role_id: impl Into<String>, subject_id: impl Into<String>, subject_type: SubjectType) -> Self {
        Self {
            role_id: role_id.into(),
            subject: Subject {
                id: subject_id.into(),
                subject_type: Some(subject_type),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AccessBindingAction {
    Add,
    Remove,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessBindingDelta {
    pub action: AccessBindingAction,
    pub access_binding: AccessBinding,
}

impl AccessBindingDelta {
    pub fn add(binding: AccessBinding) -> Self {
        Self {
            action: AccessBindingAction::Add,
            access_binding: binding,
        }
    }

    pub fn remove(binding: AccessBinding) -> Self {
        Self {
            action: AccessBindingAction::Remove,
            access_binding: binding,
        }
    }
}

/// Access-binding actions for one resource collection.
#[derive(Debug, Clone)]
pub(crate) struct AccessBindingOps {
    dispatcher: Dispatcher,
    collection: &'static str,
    id_message: &'static str,
}

impl AccessBindingOps {
    pub(crate) fn new(dispatcher: Dispatcher, collection: &'static str, id_message: &'static str) -> Self {
        Self {
            dispatcher,
            collection,
            id_message,
        }
    }

    fn action_path(&self, id: &str, action: &str) -> String {
        format!("{}/{id}:{action}", self.collection)
    }

    pub(crate) async fn list(&self, id: &str, page: &PageRequest) -> Result<Value> {
        require(id, self.id_message)?;
        let query = build_query_string(&page.params());
        self.dispatcher
            .get(&format!("{}{query}", self.action_path(id, "listAccessBindings")))
            .await
    }

    pub(crate) async fn set(&self, id: &str, bindings: &[AccessBinding]) -> Result<Value> {
        require(id, self.id_message)?;
        if bindings.is_empty() {
            return Err(Error::Validation("Access bindings cannot be empty".into()));
        }
        let body = serde_json::json!({ "accessBindings": bindings });
        self.dispatcher
            .post(&self.action_path(id, "setAccessBindings"), Some(body))
            .await
    }

    pub(crate) async fn update(&self, id: &str, deltas: &[AccessBindingDelta]) -> Result<Value> {
        require(id, self.id_message)?;
        if deltas.is_empty() {
            return Err(Error::Validation(
                "Access binding deltas cannot be empty".into(),
            ));
        }
        let body = serde_json::json!({ "accessBindingDeltas": deltas });
        self.dispatcher
            .post(&self.action_path(id, "updateAccessBindings"), Some(body))
            .await
    }

    pub(crate) async fn add_role(&self, id: &str, binding: AccessBinding) -> Result<Value> {
        self.update(id, &[AccessBindingDelta::add(binding)]).await
    }

    pub(crate) async fn remove_role(&self, id: &str, binding: AccessBinding) -> Result<Value> {
        self.update(id, &[AccessBindingDelta::remove(binding)]).await
    }
}
