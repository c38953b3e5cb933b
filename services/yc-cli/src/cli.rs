use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "yc-cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Query the Yandex Cloud control-plane APIs with an OAuth token")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Path to configuration file (default: YANDEX_CLOUD_CONFIG or ./yandex-cloud.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Print a fresh IAM token
    Token,

    /// Organizations visible to the account
    #[command(subcommand)]
    Organizations(OrganizationsCommand),

    /// Clouds, optionally within one organization
    #[command(subcommand)]
    Clouds(CloudsCommand),

    /// Folders of a cloud
    #[command(subcommand)]
    Folders(FoldersCommand),

    /// Service accounts of a folder
    #[command(subcommand)]
    ServiceAccounts(ServiceAccountsCommand),

    /// User accounts by id
    #[command(subcommand)]
    UserAccounts(UserAccountsCommand),

    /// Yandex Passport accounts by login
    #[command(subcommand)]
    PassportAccounts(PassportAccountsCommand),
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum OrganizationsCommand {
    List,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum CloudsCommand {
    List {
        /// Falls back to the configured organization_id; all clouds when neither is set
        #[arg(value_name = "ORGANIZATION_ID")]
        organization_id: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum FoldersCommand {
    List {
        /// Falls back to the configured cloud_id
        #[arg(value_name = "CLOUD_ID")]
        cloud_id: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum ServiceAccountsCommand {
    List {
        /// Falls back to the configured folder_id
        #[arg(value_name = "FOLDER_ID")]
        folder_id: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum UserAccountsCommand {
    Get {
        #[arg(value_name = "ID")]
        id: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum PassportAccountsCommand {
    Get {
        #[arg(value_name = "LOGIN")]
        login: String,
    },
}
