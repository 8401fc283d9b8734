//! Event ingestion: single events to `/inputs`, batches to `/bulk`.
//!
//! Ingestion authenticates with the customer token in the URL path and goes
//! to a separate host from the query API.

use serde_json::{Map, Value};

use crate::client::LogglyClient;
use crate::error::{LogglyError, LogglyResult};
use crate::transport::HttpRequest;

pub const CONTENT_TYPE_FORM: &str = "application/x-www-form-urlencoded";
pub const CONTENT_TYPE_TEXT: &str = "text/plain";

// ── Event ─────────────────────────────────────────────────────

/// A single event to submit.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Key-value record, sent as JSON.
    Structured(Map<String, Value>),
    /// Raw text, sent as-is.
    Text(String),
}

impl Event {
    /// Render the body and pick its content type.
    ///
    /// Text that parses as JSON (including bare scalars like `123`) is sent
    /// with the form content type, same as structured records.
    pub fn encode(&self) -> LogglyResult<(String, &'static str)> {
        match self {
            Self::Structured(map) => {
                let body = serde_json::to_string(map)
                    .map_err(|e| LogglyError::Request(format!("unserializable event: {e}")))?;
                Ok((body, CONTENT_TYPE_FORM))
            }
            Self::Text(text) => {
                let content_type = if serde_json::from_str::<Value>(text).is_ok() {
                    CONTENT_TYPE_FORM
                } else {
                    CONTENT_TYPE_TEXT
                };
                Ok((text.clone(), content_type))
            }
        }
    }
}

impl From<&str> for Event {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Event {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<Map<String, Value>> for Event {
    fn from(map: Map<String, Value>) -> Self {
        Self::Structured(map)
    }
}

impl TryFrom<Value> for Event {
    type Error = LogglyError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Self::Structured(map)),
            Value::String(s) => Ok(Self::Text(s)),
            other => Err(LogglyError::Request(format!(
                "event must be an object or a string, got {other}"
            ))),
        }
    }
}

// ── Bulk Events ───────────────────────────────────────────────

/// A batch of events for the bulk endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BulkEvents {
    /// One event per entry, joined with newlines.
    Lines(Vec<String>),
    /// Events already joined by the caller.
    Joined(String),
}

impl BulkEvents {
    pub fn into_body(self) -> String {
        match self {
            Self::Lines(lines) => lines.join("\n"),
            Self::Joined(body) => body,
        }
    }
}

impl From<Vec<String>> for BulkEvents {
    fn from(lines: Vec<String>) -> Self {
        Self::Lines(lines)
    }
}

impl From<Vec<&str>> for BulkEvents {
    fn from(lines: Vec<&str>) -> Self {
        Self::Lines(lines.into_iter().map(String::from).collect())
    }
}

impl From<String> for BulkEvents {
    fn from(body: String) -> Self {
        Self::Joined(body)
    }
}

impl From<&str> for BulkEvents {
    fn from(body: &str) -> Self {
        Self::Joined(body.to_string())
    }
}

impl TryFrom<Value> for BulkEvents {
    type Error = LogglyError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(body) => Ok(Self::Joined(body)),
            Value::Array(items) => items
                .into_iter()
                .map(|item| match item {
                    Value::String(s) => Ok(s),
                    other => Err(LogglyError::Request(format!(
                        "bulk events must be strings, got {other}"
                    ))),
                })
                .collect::<LogglyResult<Vec<_>>>()
                .map(Self::Lines),
            other => Err(LogglyError::Request(format!(
                "bulk events must be a list of strings or a string, got {other}"
            ))),
        }
    }
}

/// Join several tags into the comma-separated form the tag segment accepts.
pub fn join_tags<S: AsRef<str>>(tags: &[S]) -> String {
    tags.iter()
        .map(AsRef::as_ref)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(",")
}

/// Percent-encode each comma-separated tag, keeping the commas.
fn tag_segment(tag: &str) -> String {
    tag.split(',')
        .map(urlencoding::encode)
        .collect::<Vec<_>>()
        .join(",")
}

// ── Client endpoints ──────────────────────────────────────────

impl LogglyClient {
    /// Submit one event. `tag` is appended as `/tag/{tag}` when non-empty.
    pub async fn submit(&self, event: impl Into<Event>, tag: Option<&str>) -> LogglyResult<()> {
        let token = self.ingest_token()?;
        let event: Event = event.into();
        let (body, content_type) = event.encode()?;
        let url = self.ingest_url("inputs", token, tag);
        self.post_ingest(url, body, content_type).await
    }

    /// Submit a batch of events as newline-separated plain text.
    pub async fn bulk_submit(
        &self,
        events: impl Into<BulkEvents>,
        tag: Option<&str>,
    ) -> LogglyResult<()> {
        let token = self.ingest_token()?;
        let events: BulkEvents = events.into();
        let body = events.into_body();
        let url = self.ingest_url("bulk", token, tag);
        self.post_ingest(url, body, CONTENT_TYPE_TEXT).await
    }

    fn ingest_url(&self, endpoint: &str, token: &str, tag: Option<&str>) -> String {
        let mut url = format!("{}/{endpoint}/{token}", self.config().ingest_base());
        if let Some(tag) = tag
            && !tag.is_empty()
        {
            url.push_str("/tag/");
            url.push_str(&tag_segment(tag));
        }
        url
    }

    async fn post_ingest(
        &self,
        url: String,
        body: String,
        content_type: &'static str,
    ) -> LogglyResult<()> {
        let bytes = body.len();
        let request = HttpRequest::post(url)
            .header("Content-Type", content_type)
            .body(body);

        tracing::debug!(content_type, bytes, "submitting events");
        let response = self.transport().send(request).await?;
        if !response.is_ok() {
            tracing::debug!(status = response.status, "ingestion rejected");
            return Err(response.into_error());
        }
        Ok(())
    }
}
