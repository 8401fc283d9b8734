//! Volume metrics via `/volume-metrics`.

use std::str::FromStr;

use crate::client::LogglyClient;
use crate::error::{LogglyError, LogglyResult};
use crate::types::{TimeBound, push_param};

/// Dimensions volume metrics can be grouped by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupBy {
    Host,
    App,
}

impl GroupBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Host => "host",
            Self::App => "app",
        }
    }
}

impl FromStr for GroupBy {
    type Err = LogglyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "host" => Ok(Self::Host),
            "app" => Ok(Self::App),
            other => Err(LogglyError::Request(format!(
                "invalid group_by '{other}': expected 'host' or 'app'"
            ))),
        }
    }
}

/// What volume metrics measure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeasurementType {
    VolumeBytes,
    Count,
}

impl MeasurementType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::VolumeBytes => "volume_bytes",
            Self::Count => "count",
        }
    }
}

impl FromStr for MeasurementType {
    type Err = LogglyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "volume_bytes" => Ok(Self::VolumeBytes),
            "count" => Ok(Self::Count),
            other => Err(LogglyError::Request(format!(
                "invalid measurement type '{other}': expected 'volume_bytes' or 'count'"
            ))),
        }
    }
}

/// A volume metrics request. Empty lists are omitted from the query string.
#[derive(Debug, Clone, Default)]
pub struct VolumeMetricsQuery {
    pub from: Option<TimeBound>,
    pub until: Option<TimeBound>,
    pub group_by: Vec<String>,
    /// Restrict to one host.
    pub host: Option<String>,
    /// Restrict to one application.
    pub app: Option<String>,
    pub measurement_types: Vec<String>,
}

impl VolumeMetricsQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from(mut self, from: impl Into<TimeBound>) -> Self {
        self.from = Some(from.into());
        self
    }

    pub fn until(mut self, until: impl Into<TimeBound>) -> Self {
        self.until = Some(until.into());
        self
    }

    pub fn group_by(mut self, dimension: impl Into<String>) -> Self {
        self.group_by.push(dimension.into());
        self
    }

    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    pub fn app(mut self, app: impl Into<String>) -> Self {
        self.app = Some(app.into());
        self
    }

    pub fn measurement_type(mut self, measurement: impl Into<String>) -> Self {
        self.measurement_types.push(measurement.into());
        self
    }

    /// Validate enumerated fields and render the query string.
    pub fn to_query(&self) -> LogglyResult<Vec<(String, String)>> {
        let group_by = parse_all::<GroupBy>(&self.group_by)?;
        let measurements = parse_all::<MeasurementType>(&self.measurement_types)?;

        let mut params = Vec::new();
        push_param(&mut params, "from", self.from.as_ref().map(TimeBound::to_param));
        push_param(&mut params, "until", self.until.as_ref().map(TimeBound::to_param));
        push_param(
            &mut params,
            "group_by",
            join_nonempty(group_by.iter().map(GroupBy::as_str)),
        );
        push_param(&mut params, "host", self.host.clone());
        push_param(&mut params, "app", self.app.clone());
        push_param(
            &mut params,
            "measurement_types",
            join_nonempty(measurements.iter().map(MeasurementType::as_str)),
        );
        Ok(params)
    }
}

fn parse_all<T: FromStr<Err = LogglyError>>(values: &[String]) -> LogglyResult<Vec<T>> {
    values.iter().map(|v| v.parse::<T>()).collect()
}

fn join_nonempty<'a>(items: impl Iterator<Item = &'a str>) -> Option<String> {
    let joined = items.collect::<Vec<_>>().join(",");
    (!joined.is_empty()).then_some(joined)
}

impl LogglyClient {
    /// Fetch ingestion volume metrics. The response body is returned as-is.
    pub async fn volume_metrics(
        &self,
        query: &VolumeMetricsQuery,
    ) -> LogglyResult<serde_json::Value> {
        let params = query.to_query()?;
        let caller = self.caller()?;
        caller.call("/volume-metrics", params).await
    }
}
