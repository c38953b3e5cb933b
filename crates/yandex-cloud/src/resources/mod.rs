//! Resource groups, one per API collection

mod access_bindings;
mod api_keys;
mod clouds;
mod folders;
mod organizations;
mod refresh_tokens;
mod service_accounts;
mod user_accounts;

pub use access_bindings::{
    AccessBinding, AccessBindingAction, AccessBindingDelta, Subject, SubjectType,
};
pub use api_keys::{ApiKeys, CreateApiKey};
pub use clouds::{Clouds, CreateCloud};
pub use folders::{CreateFolder, Folders};
pub use organizations::Organizations;
pub use refresh_tokens::RefreshTokens;
pub use service_accounts::{CreateServiceAccount, ServiceAccounts};
pub use user_accounts::{UserAccounts, YandexPassportUserAccounts};
