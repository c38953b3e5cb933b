//! User accounts (IAM host)

use serde_json::Value;

use crate::dispatch::{Dispatcher, require};
use crate::error::Result;

#[derive(Debug, Clone)]
pub struct UserAccounts {
    dispatcher: Dispatcher,
}

impl UserAccounts {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self { dispatcher }
    }

    pub async fn get(&self, user_account_id: &str) -> Result<Value> {
        require(user_account_id, "User account ID is required")?;
        self.dispatcher
            .get(&format!("iam/v1/userAccounts/{user_account_id}"))
            .await
    }
}

/// Lookup of Yandex Passport accounts by login.
#[derive(Debug, Clone)]
pub struct YandexPassportUserAccounts {
    dispatcher: Dispatcher,
}

impl YandexPassportUserAccounts {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self { dispatcher }
    }

    pub async fn get_by_login(&self, login: &str) -> Result<Value> {
        require(login, "Login is required")?;
        self.dispatcher
            .execute(
                transport::Method::GET,
                "iam/v1/yandexPassportUserAccounts:byLogin",
                crate::dispatch::RequestOptions::new().query("login", login),
            )
            .await
    }
}
