//! Shared test harness for E2E tests.
//!
//! Stands up a `wiremock` server playing both the query API and the
//! ingestion host, and builds clients that reach it over real HTTP.

#![allow(dead_code)]

use loggly_api::{LogglyClient, LogglyConfig};
use serde_json::{Value, json};
use tracing_subscriber::EnvFilter;
use wiremock::MockServer;

pub const API_TOKEN: &str = "api-token-123";
pub const INGEST_TOKEN: &str = "cust-token-456";

/// Install a test-writer subscriber once; later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// E2E harness: one mock server, clients pointed at it.
pub struct TestHarness {
    pub server: MockServer,
}

impl TestHarness {
    pub async fn start() -> Self {
        init_tracing();
        Self {
            server: MockServer::start().await,
        }
    }

    /// Config with base URL overrides aimed at the mock server, no credentials.
    pub fn bare_config(&self) -> LogglyConfig {
        LogglyConfig {
            api_base_url: Some(self.server.uri()),
            ingest_base_url: Some(self.server.uri()),
            timeout_secs: 2,
            ..LogglyConfig::default()
        }
    }

    /// Client with an API token and an ingestion token.
    pub fn client(&self) -> LogglyClient {
        let config = LogglyConfig {
            api_token: Some(API_TOKEN.into()),
            token: Some(INGEST_TOKEN.into()),
            ..self.bare_config()
        };
        LogglyClient::new(config).expect("reqwest client should build")
    }

    /// Client authenticating with basic auth only.
    pub fn basic_auth_client(&self, username: &str, password: &str) -> LogglyClient {
        let config = LogglyConfig {
            username: Some(username.into()),
            password: Some(password.into()),
            ..self.bare_config()
        };
        LogglyClient::new(config).expect("reqwest client should build")
    }

    /// Absolute continuation URL the service would return for `cursor`.
    pub fn next_url(&self, cursor: &str) -> String {
        format!(
            "{}/apiv2/events/iterate?next={cursor}",
            self.server.uri()
        )
    }

    pub fn iterate_path() -> &'static str {
        "/apiv2/events/iterate"
    }
}

/// A search page body; `next` is omitted when `None`.
pub fn page(events: Value, next: Option<String>) -> Value {
    match next {
        Some(url) => json!({"events": events, "next": url}),
        None => json!({"events": events}),
    }
}

/// A canned `/customer` response.
pub fn customer_body() -> Value {
    json!({
        "tokens": [INGEST_TOKEN],
        "subdomain": "acme",
        "subscription": {
            "subscription_name": "Standard",
            "retention_days": 15,
            "volume_limit_mb": 1024
        }
    })
}
