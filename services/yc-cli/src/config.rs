//! Configuration types and loading
//!
//! Config path precedence: `--config` > YANDEX_CLOUD_CONFIG > ./yandex-cloud.toml.
//! The OAuth token is loaded from YANDEX_CLOUD_OAUTH_TOKEN or oauth_token_file,
//! never stored in the TOML directly.

use common::Secret;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use transport::HttpSettings;
use yandex_cloud::{ClientSettings, Endpoints};

pub const DEFAULT_CONFIG_PATH: &str = "yandex-cloud.toml";

const OAUTH_TOKEN_ENV: &str = "YANDEX_CLOUD_OAUTH_TOKEN";
const ORGANIZATION_ID_ENV: &str = "YANDEX_CLOUD_ORGANIZATION_ID";
const CLOUD_ID_ENV: &str = "YANDEX_CLOUD_CLOUD_ID";
const FOLDER_ID_ENV: &str = "YANDEX_CLOUD_FOLDER_ID";

/// Root configuration
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    #[serde(skip)]
    pub oauth_token: Option<Secret<String>>,
    /// Path to a file containing the OAuth token (alternative to the env var)
    pub oauth_token_file: Option<PathBuf>,
    pub organization_id: Option<String>,
    pub cloud_id: Option<String>,
    pub folder_id: Option<String>,
    pub http: HttpConfig,
    pub endpoints: EndpointOverrides,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        let defaults = HttpSettings::default();
        Self {
            timeout_secs: defaults.timeout.as_secs(),
            connect_timeout_secs: defaults.connect_timeout.as_secs(),
        }
    }
}

/// Per-host overrides; unset fields keep the public Yandex Cloud hosts.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct EndpointOverrides {
    pub token: Option<String>,
    pub iam: Option<String>,
    pub organization_manager: Option<String>,
    pub resource_manager: Option<String>,
}

impl Config {
    /// Load configuration from a TOML file, then overlay environment variables.
    pub fn load(path: &Path) -> common::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Load `path` if it was chosen explicitly; the implicit default file may
    /// be absent, in which case built-in defaults plus env vars apply.
    pub fn load_or_default(path: &Path, explicit: bool) -> common::Result<Self> {
        if !explicit && !path.exists() {
            return Self::from_toml("");
        }
        Self::load(path)
    }

    fn from_toml(contents: &str) -> common::Result<Self> {
        let mut config: Config = toml::from_str(contents)?;
        config.validate()?;

        // OAuth token: env var takes precedence over file
        if let Ok(token) = std::env::var(OAUTH_TOKEN_ENV)
            && !token.trim().is_empty()
        {
            config.oauth_token = Some(Secret::new(token.trim().to_owned()));
        } else if let Some(ref token_file) = config.oauth_token_file {
            let token = std::fs::read_to_string(token_file).map_err(|e| {
                common::Error::Config(format!(
                    "failed to read oauth_token_file {}: {e}",
                    token_file.display()
                ))
            })?;
            let token = token.trim().to_owned();
            if !token.is_empty() {
                config.oauth_token = Some(Secret::new(token));
            }
        }

        overlay_env(&mut config.organization_id, ORGANIZATION_ID_ENV);
        overlay_env(&mut config.cloud_id, CLOUD_ID_ENV);
        overlay_env(&mut config.folder_id, FOLDER_ID_ENV);

        Ok(config)
    }

    fn validate(&self) -> common::Result<()> {
        if self.http.timeout_secs == 0 {
            return Err(common::Error::Config(
                "http.timeout_secs must be greater than 0".into(),
            ));
        }
        if self.http.connect_timeout_secs == 0 {
            return Err(common::Error::Config(
                "http.connect_timeout_secs must be greater than 0".into(),
            ));
        }

        let overrides = [
            ("token", &self.endpoints.token),
            ("iam", &self.endpoints.iam),
            ("organization_manager", &self.endpoints.organization_manager),
            ("resource_manager", &self.endpoints.resource_manager),
        ];
        for (name, value) in overrides {
            if let Some(url) = value
                && !url.starts_with("http://")
                && !url.starts_with("https://")
            {
                return Err(common::Error::Config(format!(
                    "endpoints.{name} must start with http:// or https://, got: {url}"
                )));
            }
        }
        Ok(())
    }

    /// HTTP timeouts and hosts for `YandexCloudClient::new`.
    pub fn client_settings(&self) -> ClientSettings {
        let mut endpoints = Endpoints::default();
        if let Some(ref token) = self.endpoints.token {
            endpoints.token = token.clone();
        }
        if let Some(ref iam) = self.endpoints.iam {
            endpoints.iam = iam.clone();
        }
        if let Some(ref org) = self.endpoints.organization_manager {
            endpoints.organization_manager = org.clone();
        }
        if let Some(ref rm) = self.endpoints.resource_manager {
            endpoints.resource_manager = rm.clone();
        }

        ClientSettings {
            http: HttpSettings {
                timeout: Duration::from_secs(self.http.timeout_secs),
                connect_timeout: Duration::from_secs(self.http.connect_timeout_secs),
            },
            endpoints,
        }
    }

    /// Resolve config file path from CLI arg or YANDEX_CLOUD_CONFIG env var.
    /// The flag is true when the path was chosen explicitly.
    pub fn resolve_path(cli_path: Option<&str>) -> (PathBuf, bool) {
        if let Some(p) = cli_path {
            return (PathBuf::from(p), true);
        }
        if let Ok(p) = std::env::var("YANDEX_CLOUD_CONFIG") {
            return (PathBuf::from(p), true);
        }
        (PathBuf::from(DEFAULT_CONFIG_PATH), false)
    }
}

fn overlay_env(target: &mut Option<String>, var: &str) {
    if let Ok(value) = std::env::var(var)
        && !value.trim().is_empty()
    {
        *target = Some(value.trim().to_owned());
    }
}
