//! Client configuration, loadable from TOML.

use serde::Deserialize;

use crate::error::{LogglyError, LogglyResult};

/// Connection and credential settings for a `LogglyClient`.
#[derive(Clone, Deserialize)]
pub struct LogglyConfig {
    /// Account subdomain (`{subdomain}.loggly.com`). Required for queries.
    #[serde(default)]
    pub subdomain: Option<String>,
    /// API token sent as a bearer header. Preferred over basic auth.
    #[serde(default)]
    pub api_token: Option<String>,
    /// Basic-auth username.
    #[serde(default)]
    pub username: Option<String>,
    /// Basic-auth password.
    #[serde(default)]
    pub password: Option<String>,
    /// Customer token used by the ingestion endpoints.
    #[serde(default)]
    pub token: Option<String>,
    /// Service domain shared by the query and ingestion hosts.
    #[serde(default = "default_service_host")]
    pub service_host: String,
    /// Overrides `https://{subdomain}.{service_host}` for the query API.
    #[serde(default)]
    pub api_base_url: Option<String>,
    /// Overrides `https://logs-01.{service_host}` for ingestion.
    #[serde(default)]
    pub ingest_base_url: Option<String>,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_service_host() -> String {
    "loggly.com".into()
}
fn default_timeout_secs() -> u64 {
    30
}

impl Default for LogglyConfig {
    fn default() -> Self {
        Self {
            subdomain: None,
            api_token: None,
            username: None,
            password: None,
            token: None,
            service_host: default_service_host(),
            api_base_url: None,
            ingest_base_url: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl std::fmt::Debug for LogglyConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogglyConfig")
            .field("subdomain", &self.subdomain)
            .field("api_token", &self.api_token.as_ref().map(|_| "<redacted>"))
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("service_host", &self.service_host)
            .field("api_base_url", &self.api_base_url)
            .field("ingest_base_url", &self.ingest_base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl LogglyConfig {
    /// Load config from a TOML file path.
    pub fn from_file(path: &str) -> LogglyResult<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| LogglyError::Config(format!("{path}: {e}")))?;
        Self::from_toml_str(&contents)
    }

    /// Parse config from a TOML document.
    pub fn from_toml_str(contents: &str) -> LogglyResult<Self> {
        toml::from_str(contents).map_err(|e| LogglyError::Config(e.to_string()))
    }

    /// Base URL of the query API, including the `/apiv2` prefix.
    pub fn api_base(&self) -> LogglyResult<String> {
        if let Some(base) = &self.api_base_url {
            return Ok(format!("{}/apiv2", base.trim_end_matches('/')));
        }
        match self.subdomain.as_deref() {
            Some(sub) if !sub.is_empty() => {
                Ok(format!("https://{sub}.{}/apiv2", self.service_host))
            }
            _ => Err(LogglyError::Config("subdomain is not configured".into())),
        }
    }

    /// Base URL of the ingestion API.
    pub fn ingest_base(&self) -> String {
        match &self.ingest_base_url {
            Some(base) => base.trim_end_matches('/').to_string(),
            None => format!("https://logs-01.{}", self.service_host),
        }
    }
}
