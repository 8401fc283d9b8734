//! Loggly client session and the query API caller.
//!
//! `LogglyClient` owns credentials, configuration and the cached account
//! info. Query endpoints go through an `ApiCaller`, which is resolved per
//! operation so that auth failures surface before any request is sent.
//! Endpoint methods live next to their request types (`search.rs`,
//! `stats.rs`, `submit.rs`, `volume.rs`).

use std::sync::Arc;
use std::time::Duration;

use crate::auth::{AuthMethod, Credentials};
use crate::config::LogglyConfig;
use crate::error::{LogglyError, LogglyResult};
use crate::transport::{HttpRequest, ReqwestTransport, Transport};
use crate::types::AccountInfo;

// ── ApiCaller ─────────────────────────────────────────────────

/// Issues authenticated GET requests against the query API.
///
/// Cheap to clone: holds the shared transport, the resolved auth method and
/// the base URL. Search iterators carry their own copy.
#[derive(Clone)]
pub struct ApiCaller {
    transport: Arc<dyn Transport>,
    base_url: String,
    auth: AuthMethod,
}

impl ApiCaller {
    pub fn new(transport: Arc<dyn Transport>, base_url: impl Into<String>, auth: AuthMethod) -> Self {
        Self {
            transport,
            base_url: base_url.into(),
            auth,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `{base_url}{path}` and decode the JSON body.
    ///
    /// Any status other than 200 becomes a `Response` error carrying the
    /// status, reason phrase and raw body.
    pub async fn call(
        &self,
        path: &str,
        query: Vec<(String, String)>,
    ) -> LogglyResult<serde_json::Value> {
        let url = format!("{}{path}", self.base_url);
        let request = HttpRequest::get(&url)
            .header("Authorization", self.auth.header_value())
            .header("Accept", "application/json")
            .query(query);

        tracing::debug!(method = "GET", url = %url, "loggly api call");
        let response = self.transport.send(request).await?;
        tracing::debug!(url = %url, status = response.status, "loggly api response");

        if !response.is_ok() {
            return Err(response.into_error());
        }
        response.json()
    }
}

impl std::fmt::Debug for ApiCaller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiCaller")
            .field("base_url", &self.base_url)
            .field("auth", &self.auth)
            .finish_non_exhaustive()
    }
}

// ── LogglyClient ──────────────────────────────────────────────

/// A Loggly API session.
pub struct LogglyClient {
    config: LogglyConfig,
    credentials: Credentials,
    account: Option<AccountInfo>,
    transport: Arc<dyn Transport>,
}

impl LogglyClient {
    /// Create a client using the production `reqwest` transport.
    pub fn new(config: LogglyConfig) -> LogglyResult<Self> {
        let transport = ReqwestTransport::new(Duration::from_secs(config.timeout_secs))?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Create a client over any transport (mocks in tests).
    pub fn with_transport(config: LogglyConfig, transport: Arc<dyn Transport>) -> Self {
        let credentials = Credentials::from_config(&config);
        Self {
            config,
            credentials,
            account: None,
            transport,
        }
    }

    pub fn config(&self) -> &LogglyConfig {
        &self.config
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    // ── Configuration ─────────────────────────────────────────

    pub fn set_subdomain(&mut self, subdomain: impl Into<String>) {
        self.config.subdomain = Some(subdomain.into());
    }

    /// Set the API token used for bearer auth.
    pub fn set_api_token(&mut self, token: impl Into<String>) {
        self.credentials.api_token = Some(token.into());
    }

    pub fn set_basic_auth(&mut self, username: impl Into<String>, password: impl Into<String>) {
        self.credentials.username = Some(username.into());
        self.credentials.password = Some(password.into());
    }

    pub fn clear_credentials(&mut self) {
        self.credentials = Credentials::default();
    }

    /// Set the customer token used by the ingestion endpoints.
    pub fn set_ingest_token(&mut self, token: impl Into<String>) {
        self.config.token = Some(token.into());
    }

    pub fn resolve_auth(&self) -> Option<AuthMethod> {
        self.credentials.resolve_auth()
    }

    /// Account info cached by the last successful `account_info()` call.
    pub fn cached_account(&self) -> Option<&AccountInfo> {
        self.account.as_ref()
    }

    // ── Internal helpers ──────────────────────────────────────

    /// Resolve auth and base URL for a query API call.
    pub fn caller(&self) -> LogglyResult<ApiCaller> {
        let auth = self.resolve_auth().ok_or(LogglyError::Authentication)?;
        let base_url = self.config.api_base()?;
        Ok(ApiCaller::new(self.transport.clone(), base_url, auth))
    }

    pub(crate) fn ingest_token(&self) -> LogglyResult<&str> {
        self.config
            .token
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or(LogglyError::Authentication)
    }

    pub(crate) fn transport(&self) -> &Arc<dyn Transport> {
        &self.transport
    }

    // ── Account ───────────────────────────────────────────────

    /// Fetch account metadata, cache it, and return the raw response.
    pub async fn account_info(&mut self) -> LogglyResult<serde_json::Value> {
        let caller = self.caller()?;
        let response = caller.call("/customer", Vec::new()).await?;

        let info = AccountInfo::from_response(&response)?;
        tracing::info!(
            subdomain = %info.subdomain,
            retention_days = info.retention_days,
            volume_limit_mb = info.volume_limit_mb,
            "account info refreshed"
        );
        self.account = Some(info);

        Ok(response)
    }
}

impl std::fmt::Debug for LogglyClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogglyClient")
            .field("config", &self.config)
            .field("credentials", &self.credentials)
            .field("account", &self.account)
            .finish_non_exhaustive()
    }
}
