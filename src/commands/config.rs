use anyhow::{Context, Result, bail};
use log::debug;
use reqwest::Client;
use serde::Deserialize;
use std::path::PathBuf;

use crate::{
    pyload::{Destination, PyloadClient},
    runtime::Runtime,
};

pub const DEFAULT_URL: &str = "http://localhost:8000";

pub const ENV_URL: &str = "PYLOAD_URL";
pub const ENV_USERNAME: &str = "PYLOAD_USERNAME";
pub const ENV_PASSWORD: &str = "PYLOAD_PASSWORD";

/// Connection options given on the command line. Unset fields fall back to
/// the environment, then the config file, then defaults.
#[derive(Debug, Clone, Default)]
pub struct ConnectionArgs {
    pub url: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    /// Explicit config file; must exist when given
    pub config_file: Option<PathBuf>,
    pub destination: Destination,
}

/// Contents of `config.json`
#[derive(Deserialize, Debug, Default, PartialEq)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    url: Option<String>,
    username: Option<String>,
    password: Option<String>,
}

/// Fully resolved connection settings.
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectionSettings {
    pub url: String,
    pub username: Option<String>,
    pub password: Option<String>,
    pub destination: Destination,
}

/// `<config_dir>/pyload-merge/config.json`
pub fn default_config_path<R: Runtime>(runtime: &R) -> Option<PathBuf> {
    runtime
        .config_dir()
        .map(|dir| dir.join("pyload-merge").join("config.json"))
}

fn load_config_file<R: Runtime>(runtime: &R, args: &ConnectionArgs) -> Result<ConfigFile> {
    let path = match &args.config_file {
        Some(path) => {
            if !runtime.exists(path) {
                bail!("Config file {} does not exist", path.display());
            }
            path.clone()
        }
        None => match default_config_path(runtime) {
            Some(path) if runtime.exists(&path) => path,
            _ => return Ok(ConfigFile::default()),
        },
    };

    debug!("Loading config from {:?}", path);
    let contents = runtime.read_to_string(&path)?;
    serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse config file {}", path.display()))
}

/// Resolve connection settings: flag, environment, config file, default.
#[tracing::instrument(skip(runtime, args))]
pub fn resolve_settings<R: Runtime>(runtime: &R, args: &ConnectionArgs) -> Result<ConnectionSettings> {
    let file = load_config_file(runtime, args)?;
    let env = |key: &str| runtime.env_var(key).ok().filter(|v| !v.is_empty());

    let url = args
        .url
        .clone()
        .or_else(|| env(ENV_URL))
        .or(file.url)
        .unwrap_or_else(|| DEFAULT_URL.to_string());
    let username = args.username.clone().or_else(|| env(ENV_USERNAME)).or(file.username);
    let password = args.password.clone().or_else(|| env(ENV_PASSWORD)).or(file.password);

    Ok(ConnectionSettings {
        url,
        username,
        password,
        destination: args.destination,
    })
}

pub struct Config<R: Runtime> {
    pub runtime: R,
    pub client: PyloadClient,
}

impl<R: Runtime> Config<R> {
    /// Resolve settings and connect, logging in when a username is configured.
    pub async fn new(runtime: R, args: &ConnectionArgs) -> Result<Self> {
        let settings = resolve_settings(&runtime, args)?;

        let client = Client::builder()
            .user_agent("pyload-merge")
            .cookie_store(true)
            .build()?;
        let mut client = PyloadClient::new(client, &settings.url, settings.destination);

        match &settings.username {
            Some(username) => {
                let password = settings.password.as_deref().unwrap_or_default();
                client.login(username, password).await?;
            }
            None => debug!("No pyLoad username configured, skipping login"),
        }

        Ok(Self { runtime, client })
    }
}
