//! Field statistics via `/stats/{stat}/{field}`.

use std::str::FromStr;

use crate::client::LogglyClient;
use crate::error::{LogglyError, LogglyResult};
use crate::types::{TimeBound, push_param};

/// Aggregations accepted by the stats endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatKind {
    Avg,
    Sum,
    Min,
    Max,
    Percentiles,
    ValueCount,
    Cardinality,
    Stats,
    Extended,
    All,
}

impl StatKind {
    pub const ALL: [StatKind; 10] = [
        Self::Avg,
        Self::Sum,
        Self::Min,
        Self::Max,
        Self::Percentiles,
        Self::ValueCount,
        Self::Cardinality,
        Self::Stats,
        Self::Extended,
        Self::All,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Avg => "avg",
            Self::Sum => "sum",
            Self::Min => "min",
            Self::Max => "max",
            Self::Percentiles => "percentiles",
            Self::ValueCount => "value_count",
            Self::Cardinality => "cardinality",
            Self::Stats => "stats",
            Self::Extended => "extended",
            Self::All => "all",
        }
    }
}

impl std::fmt::Display for StatKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case-insensitive: `AVG` parses as `avg`.
impl FromStr for StatKind {
    type Err = LogglyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == lower)
            .ok_or_else(|| LogglyError::Request(format!("unknown stat: {lower}")))
    }
}

/// A stats request. `stat` defaults to `all` and `query` to `*`.
#[derive(Debug, Clone, Default)]
pub struct StatsQuery {
    pub stat: Option<String>,
    /// Field to aggregate. Required.
    pub field: Option<String>,
    pub query: Option<String>,
    pub from: Option<TimeBound>,
    pub until: Option<TimeBound>,
}

impl StatsQuery {
    pub fn new(stat: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            stat: Some(stat.into()),
            field: Some(field.into()),
            ..Self::default()
        }
    }

    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn from(mut self, from: impl Into<TimeBound>) -> Self {
        self.from = Some(from.into());
        self
    }

    pub fn until(mut self, until: impl Into<TimeBound>) -> Self {
        self.until = Some(until.into());
        self
    }

    /// Validate and render the endpoint path and query string.
    pub fn to_request(&self) -> LogglyResult<(String, Vec<(String, String)>)> {
        let stat = match self.stat.as_deref() {
            Some(s) => s.parse::<StatKind>()?,
            None => StatKind::All,
        };
        let field = self
            .field
            .as_deref()
            .filter(|f| !f.is_empty())
            .ok_or_else(|| LogglyError::Request("stats requires a field".into()))?;

        let mut params = Vec::new();
        let query = self.query.clone().unwrap_or_else(|| "*".to_string());
        push_param(&mut params, "q", Some(query));
        push_param(&mut params, "from", self.from.as_ref().map(TimeBound::to_param));
        push_param(&mut params, "until", self.until.as_ref().map(TimeBound::to_param));

        let field = urlencoding::encode(field);
        Ok((format!("/stats/{stat}/{field}"), params))
    }
}

impl LogglyClient {
    /// Compute a statistic over a field. The response body is returned as-is.
    pub async fn stats(&self, query: &StatsQuery) -> LogglyResult<serde_json::Value> {
        let (path, params) = query.to_request()?;
        let caller = self.caller()?;
        caller.call(&path, params).await
    }
}
