use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use log::{debug, info};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use super::error::{ApiError, check_status};
use crate::domain::model::{Package, Pid};

/// Supplies the packages to group.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PackageSource: Send + Sync {
    async fn fetch_all(&self) -> Result<Vec<Package>>;
}

/// Applies merge mutations. Calls are independent and not transactional.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MutationSink: Send + Sync {
    async fn rename(&self, pid: Pid, new_name: &str) -> Result<()>;
    async fn append_links(&self, pid: Pid, urls: &[String]) -> Result<()>;
    async fn delete_packages(&self, pids: &[Pid]) -> Result<()>;
}

/// Which pyLoad package list to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Destination {
    #[default]
    Collector,
    Queue,
}

impl Destination {
    fn api_method(self) -> &'static str {
        match self {
            Destination::Collector => "getCollectorData",
            Destination::Queue => "getQueueData",
        }
    }
}

/// Client for the pyLoad 0.4 web API (`/api/<method>`).
///
/// Arguments are sent as form fields holding JSON values; the session id from
/// `login` rides along as a plain `session` field. When pyLoad cannot hand out
/// the id it only sets the session cookie, so the reqwest client should keep a
/// cookie store.
pub struct PyloadClient {
    client: Client,
    api_url: String,
    session: Option<String>,
    authenticated: bool,
    destination: Destination,
}

impl PyloadClient {
    #[tracing::instrument(skip(client))]
    pub fn new(client: Client, url: &str, destination: Destination) -> Self {
        Self {
            client,
            api_url: format!("{}/api", url.trim_end_matches('/')),
            session: None,
            authenticated: false,
            destination,
        }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub fn is_logged_in(&self) -> bool {
        self.authenticated
    }

    /// Log in and keep the session id for every following call.
    #[tracing::instrument(skip(self, password))]
    pub async fn login(&mut self, username: &str, password: &str) -> Result<()> {
        debug!("Logging in to {} as {}...", self.api_url, username);

        let response = self
            .client
            .post(format!("{}/login", self.api_url))
            .form(&[("username", username), ("password", password)])
            .send()
            .await
            .context("Failed to send login request to pyLoad")?;

        let response = check_status(response, "login")?;
        let body: Value = response
            .json()
            .await
            .context("Failed to parse login response from pyLoad")?;

        // `false` for bad credentials, `true` when only the cookie carries the session
        match body {
            Value::String(session) if !session.is_empty() => {
                info!("Logged in to pyLoad as {}", username);
                self.session = Some(session);
                self.authenticated = true;
                Ok(())
            }
            Value::Bool(true) => {
                info!("Logged in to pyLoad as {} (cookie session)", username);
                self.authenticated = true;
                Ok(())
            }
            Value::Bool(false) => Err(ApiError::AuthenticationFailed(format!(
                "pyLoad rejected the login for user '{}'",
                username
            ))
            .into()),
            other => bail!("Unexpected login response from pyLoad: {}", other),
        }
    }

    fn form(&self, args: &[(&str, Value)]) -> Vec<(String, String)> {
        let mut form: Vec<(String, String)> = args
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        if let Some(session) = &self.session {
            form.push(("session".to_string(), session.clone()));
        }
        form
    }

    async fn post(
        &self,
        method: &str,
        args: &[(&str, Value)],
    ) -> Result<reqwest::Response> {
        let url = format!("{}/{}", self.api_url, method);
        debug!("POST {}...", url);

        let response = self
            .client
            .post(&url)
            .form(&self.form(args))
            .send()
            .await
            .with_context(|| format!("Failed to send {} request to pyLoad", method))?;

        Ok(check_status(response, method)?)
    }

    /// Call an API method and decode its JSON result.
    #[tracing::instrument(skip(self, args))]
    async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        args: &[(&str, Value)],
    ) -> Result<T> {
        self.post(method, args)
            .await?
            .json::<T>()
            .await
            .with_context(|| format!("Failed to parse {} response from pyLoad", method))
    }

    /// Call an API method whose result carries nothing.
    #[tracing::instrument(skip(self, args))]
    async fn call_unit(&self, method: &str, args: &[(&str, Value)]) -> Result<()> {
        self.post(method, args).await?;
        Ok(())
    }
}

#[async_trait]
impl PackageSource for PyloadClient {
    #[tracing::instrument(skip(self))]
    async fn fetch_all(&self) -> Result<Vec<Package>> {
        let packages: Vec<Package> = self.call(self.destination.api_method(), &[]).await?;
        debug!(
            "Fetched {} package(s) from {:?}",
            packages.len(),
            self.destination
        );
        Ok(packages)
    }
}

#[async_trait]
impl MutationSink for PyloadClient {
    #[tracing::instrument(skip(self))]
    async fn rename(&self, pid: Pid, new_name: &str) -> Result<()> {
        self.call_unit("setPackageName", &[("pid", json!(pid)), ("name", json!(new_name))])
            .await
    }

    #[tracing::instrument(skip(self, urls))]
    async fn append_links(&self, pid: Pid, urls: &[String]) -> Result<()> {
        debug!("Adding {} link(s) to package {}", urls.len(), pid);
        self.call_unit("addFiles", &[("pid", json!(pid)), ("links", json!(urls))])
            .await
    }

    #[tracing::instrument(skip(self))]
    async fn delete_packages(&self, pids: &[Pid]) -> Result<()> {
        if pids.is_empty() {
            bail!("Refusing to call deletePackages without package ids");
        }
        self.call_unit("deletePackages", &[("pids", json!(pids))]).await
    }
}
