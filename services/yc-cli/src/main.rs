//! yc-cli
//!
//! Small command-line consumer of the Yandex Cloud client: exchanges the
//! configured OAuth token for an IAM token and prints API responses as JSON.

mod cli;
mod commands;
mod config;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use yandex_cloud::YandexCloudClient;

use crate::cli::Cli;
use crate::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // JSON logs on stderr so stdout stays machine-readable
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_env("LOG_LEVEL")
                .or_else(|_| EnvFilter::try_from_default_env())
                .unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr),
        )
        .init();

    let cli = Cli::parse();

    let (config_path, explicit) = Config::resolve_path(cli.config.as_deref());
    debug!(path = %config_path.display(), explicit, "loading configuration");
    let config = Config::load_or_default(&config_path, explicit)
        .with_context(|| format!("failed to load config from {}", config_path.display()))?;

    let oauth_token = config.oauth_token.as_ref().context(
        "no OAuth token: set YANDEX_CLOUD_OAUTH_TOKEN or oauth_token_file in the config",
    )?;
    let client = YandexCloudClient::new(oauth_token.expose().as_str(), config.client_settings())
        .context("failed to build Yandex Cloud client")?;

    info!(command = ?cli.command, "running command");
    let value = commands::run(cli.command, &client, &config).await?;
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}
