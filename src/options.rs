//! Client configuration
//!
//! [`DatastoreOptions`] decides which endpoint a client talks to and which
//! credentials it presents. Build it with [`DatastoreOptions::builder`] or
//! load it from the environment with [`DatastoreOptions::from_env`].

use crate::error::OptionsError;
use crate::{API_VERSION, DEFAULT_HOST};
use serde::Deserialize;
use std::time::Duration;

/// Project id to use when none is passed explicitly
pub const PROJECT_ID_ENV_VAR: &str = "DATASTORE_PROJECT_ID";
/// `host:port` of a local emulator
pub const LOCAL_HOST_ENV_VAR: &str = "DATASTORE_EMULATOR_HOST";
/// Full project endpoint, overriding host and project id
pub const PROJECT_ENDPOINT_ENV_VAR: &str = "DATASTORE_PROJECT_ENDPOINT";
/// Static OAuth2 bearer token
pub const ACCESS_TOKEN_ENV_VAR: &str = "DATASTORE_ACCESS_TOKEN";

/// Validated client configuration
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "DatastoreOptionsBuilder")]
pub struct DatastoreOptions {
    project_id: Option<String>,
    project_endpoint: Option<String>,
    host: Option<String>,
    local_host: Option<String>,
    access_token: Option<String>,
    timeout: Option<Duration>,
}

impl DatastoreOptions {
    pub fn builder() -> DatastoreOptionsBuilder {
        DatastoreOptionsBuilder::default()
    }

    /// Build options from `DATASTORE_*` environment variables
    pub fn from_env() -> Result<Self, OptionsError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build options from an arbitrary variable source
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, OptionsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        DatastoreOptionsBuilder {
            project_id: get(PROJECT_ID_ENV_VAR),
            project_endpoint: get(PROJECT_ENDPOINT_ENV_VAR),
            host: None,
            local_host: get(LOCAL_HOST_ENV_VAR),
            access_token: get(ACCESS_TOKEN_ENV_VAR),
            timeout_ms: None,
        }
        .build()
    }

    pub fn project_id(&self) -> Option<&str> {
        self.project_id.as_deref()
    }

    pub fn local_host(&self) -> Option<&str> {
        self.local_host.as_deref()
    }

    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// The project endpoint used by the HTTP transport
    ///
    /// Method calls are sent to `{project_url}:{method}`.
    pub fn project_url(&self) -> String {
        if let Some(endpoint) = &self.project_endpoint {
            return endpoint.trim_end_matches('/').to_string();
        }
        format!(
            "{}/{}/projects/{}",
            self.service_url(),
            API_VERSION,
            self.project_id.as_deref().unwrap_or_default()
        )
    }

    /// Scheme and authority of the service, used by the gRPC transport
    pub fn service_url(&self) -> String {
        if let Some(endpoint) = &self.project_endpoint {
            return origin_of(endpoint);
        }
        match (&self.local_host, &self.host) {
            (Some(local_host), _) => format!("http://{}", local_host.trim_end_matches('/')),
            (None, Some(host)) => with_scheme(host),
            (None, None) => DEFAULT_HOST.to_string(),
        }
    }
}

impl std::fmt::Debug for DatastoreOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatastoreOptions")
            .field("project_id", &self.project_id)
            .field("project_endpoint", &self.project_endpoint)
            .field("host", &self.host)
            .field("local_host", &self.local_host)
            .field(
                "access_token",
                &self
                    .access_token
                    .as_ref()
                    .map(|t| format!("{}...", t.chars().take(8).collect::<String>())),
            )
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Builder for [`DatastoreOptions`]
///
/// Also the serde shape of the options, so they can be read from a config file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DatastoreOptionsBuilder {
    project_id: Option<String>,
    project_endpoint: Option<String>,
    host: Option<String>,
    local_host: Option<String>,
    access_token: Option<String>,
    /// Request timeout in milliseconds
    timeout_ms: Option<u64>,
}

impl DatastoreOptionsBuilder {
    pub fn project_id(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }

    /// Use a full endpoint such as `https://example.com/v1beta3/projects/p`
    pub fn project_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.project_endpoint = Some(endpoint.into());
        self
    }

    /// Use a non-default service host such as `https://staging.example.com`
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Talk plain HTTP to an emulator at `host:port`
    pub fn local_host(mut self, local_host: impl Into<String>) -> Self {
        self.local_host = Some(local_host.into());
        self
    }

    pub fn access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = Some(u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX));
        self
    }

    pub fn build(self) -> Result<DatastoreOptions, OptionsError> {
        if self.project_endpoint.is_none() && self.project_id.is_none() {
            return Err(OptionsError::MissingProject);
        }
        if self.project_endpoint.is_some() && (self.host.is_some() || self.local_host.is_some()) {
            return Err(OptionsError::ConflictingEndpoint(
                "project endpoint can't be combined with host or local host".to_string(),
            ));
        }
        if self.host.is_some() && self.local_host.is_some() {
            return Err(OptionsError::ConflictingEndpoint(
                "host and local host are mutually exclusive".to_string(),
            ));
        }
        if self.local_host.is_some() && self.access_token.is_some() {
            return Err(OptionsError::CredentialsWithLocalHost);
        }
        if let Some(endpoint) = &self.project_endpoint {
            if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
                return Err(OptionsError::InvalidEndpoint(endpoint.clone()));
            }
        }

        Ok(DatastoreOptions {
            project_id: self.project_id,
            project_endpoint: self.project_endpoint,
            host: self.host,
            local_host: self.local_host,
            access_token: self.access_token,
            timeout: self.timeout_ms.map(Duration::from_millis),
        })
    }
}

impl TryFrom<DatastoreOptionsBuilder> for DatastoreOptions {
    type Error = OptionsError;

    fn try_from(builder: DatastoreOptionsBuilder) -> Result<Self, Self::Error> {
        builder.build()
    }
}

fn with_scheme(host: &str) -> String {
    let host = host.trim_end_matches('/');
    if host.starts_with("http://") || host.starts_with("https://") {
        host.to_string()
    } else {
        format!("https://{}", host)
    }
}

/// `https://a.example.com:443/v1beta3/projects/p` -> `https://a.example.com:443`
fn origin_of(endpoint: &str) -> String {
    let (scheme, rest) = endpoint.split_once("://").unwrap_or(("https", endpoint));
    let authority = rest.split('/').next().unwrap_or(rest);
    format!("{}://{}", scheme, authority)
}
