//! Shared wire types: account metadata and time bounds.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{LogglyError, LogglyResult};

// ── Account Info ──────────────────────────────────────────────

/// Account metadata returned by `GET /apiv2/customer`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountInfo {
    pub subdomain: String,
    /// Customer (ingestion) tokens on the account.
    pub tokens: Vec<String>,
    pub retention_days: u32,
    pub volume_limit_mb: u64,
}

/// Wire shape of the customer response (only fields we need).
#[derive(Deserialize)]
struct CustomerResponse {
    subdomain: String,
    #[serde(default)]
    tokens: Vec<String>,
    subscription: Subscription,
}

#[derive(Deserialize)]
struct Subscription {
    retention_days: u32,
    volume_limit_mb: u64,
}

impl AccountInfo {
    /// Extract account metadata from a raw customer response.
    pub fn from_response(value: &serde_json::Value) -> LogglyResult<Self> {
        let raw = CustomerResponse::deserialize(value)
            .map_err(|e| LogglyError::Decode(format!("customer response: {e}")))?;
        Ok(Self {
            subdomain: raw.subdomain,
            tokens: raw.tokens,
            retention_days: raw.subscription.retention_days,
            volume_limit_mb: raw.subscription.volume_limit_mb,
        })
    }
}

// ── Time Bound ────────────────────────────────────────────────

/// A `from`/`until` value for search, stats and volume queries.
///
/// Either a service expression such as `-24h` or `now`, or an absolute
/// instant rendered as RFC 3339 with millisecond precision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimeBound {
    Expr(String),
    At(DateTime<Utc>),
}

impl TimeBound {
    pub fn to_param(&self) -> String {
        match self {
            Self::Expr(s) => s.clone(),
            Self::At(t) => t.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

impl std::fmt::Display for TimeBound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_param())
    }
}

impl From<&str> for TimeBound {
    fn from(s: &str) -> Self {
        Self::Expr(s.to_string())
    }
}

impl From<String> for TimeBound {
    fn from(s: String) -> Self {
        Self::Expr(s)
    }
}

impl From<DateTime<Utc>> for TimeBound {
    fn from(t: DateTime<Utc>) -> Self {
        Self::At(t)
    }
}

/// Push `name=value` onto a query list when the value is present.
pub(crate) fn push_param(params: &mut Vec<(String, String)>, name: &str, value: Option<String>) {
    if let Some(v) = value {
        params.push((name.to_string(), v));
    }
}
