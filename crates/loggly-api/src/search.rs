//! Event search over the paginated `/events/iterate` endpoint.
//!
//! `SearchIterator` is a pull-based cursor: every `next_page()` call issues
//! exactly one request until the service stops returning a `next` link, after
//! which it reports completion forever without touching the network.
//! `LogglyClient::search` drains an iterator eagerly; `LogglyClient::paginate`
//! hands the iterator to the caller.

use std::str::FromStr;

use serde_json::Value;

use crate::client::{ApiCaller, LogglyClient};
use crate::cursor::extract_next_token;
use crate::error::{LogglyError, LogglyResult};
use crate::types::{TimeBound, push_param};

const EVENTS_ITERATE_PATH: &str = "/events/iterate";

// ── Search Order ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOrder {
    Asc,
    Desc,
}

impl SearchOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl FromStr for SearchOrder {
    type Err = LogglyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(LogglyError::Request(format!(
                "invalid order '{other}': expected 'asc' or 'desc'"
            ))),
        }
    }
}

// ── Search Params ─────────────────────────────────────────────

/// Parameters for an event search. All fields are optional.
#[derive(Debug, Clone, Default)]
pub struct SearchParams {
    /// Search query (`q`).
    pub query: Option<String>,
    pub from: Option<TimeBound>,
    pub until: Option<TimeBound>,
    /// Events per page (`size`).
    pub size: Option<u32>,
    /// `asc` or `desc`; anything else is rejected before the request.
    pub order: Option<String>,
}

impl SearchParams {
    pub fn new() -> Self {
        Self::default()
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

    pub fn size(mut self, size: u32) -> Self {
        self.size = Some(size);
        self
    }

    pub fn order(mut self, order: impl Into<String>) -> Self {
        self.order = Some(order.into());
        self
    }

    /// Validate and render the query-string parameters.
    pub fn to_query(&self) -> LogglyResult<Vec<(String, String)>> {
        let order = self.order.as_deref().map(SearchOrder::from_str).transpose()?;

        let mut params = Vec::new();
        push_param(&mut params, "q", self.query.clone());
        push_param(&mut params, "from", self.from.as_ref().map(TimeBound::to_param));
        push_param(&mut params, "until", self.until.as_ref().map(TimeBound::to_param));
        push_param(&mut params, "size", self.size.map(|s| s.to_string()));
        push_param(&mut params, "order", order.map(|o| o.as_str().to_string()));
        Ok(params)
    }
}

// ── Search Iterator ───────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
enum CursorState {
    /// No page fetched yet.
    Init,
    /// More pages expected; holds the cursor for the next request.
    Active(String),
    /// The last page carried no cursor. Terminal.
    Done,
}

/// Lazy, single-use traversal of a search result set.
///
/// Build a fresh iterator per search; once exhausted it stays exhausted.
#[derive(Debug)]
pub struct SearchIterator {
    caller: ApiCaller,
    params: Vec<(String, String)>,
    state: CursorState,
    pages_fetched: usize,
}

impl SearchIterator {
    pub fn new(caller: ApiCaller, params: Vec<(String, String)>) -> Self {
        Self {
            caller,
            params,
            state: CursorState::Init,
            pages_fetched: 0,
        }
    }

    /// Whether another `next_page()` call may yield a page.
    pub fn has_more(&self) -> bool {
        self.state != CursorState::Done
    }

    /// Cursor that the next request will send, if any.
    pub fn cursor(&self) -> Option<&str> {
        match &self.state {
            CursorState::Active(cursor) => Some(cursor),
            _ => None,
        }
    }

    pub fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }

    /// Fetch the next page of events.
    ///
    /// Returns `Ok(None)` once the result set is exhausted. A page without
    /// an `events` field yields an empty list. A failed request leaves the
    /// cursor untouched.
    pub async fn next_page(&mut self) -> LogglyResult<Option<Vec<Value>>> {
        let mut query = self.params.clone();
        match &self.state {
            CursorState::Done => return Ok(None),
            CursorState::Active(cursor) => query.push(("next".into(), cursor_param(cursor))),
            CursorState::Init => {}
        }

        let mut page = self.caller.call(EVENTS_ITERATE_PATH, query).await?;
        self.pages_fetched += 1;
        self.state = next_state(&page);

        let events = match page.get_mut("events").map(Value::take) {
            Some(Value::Array(events)) => events,
            _ => Vec::new(),
        };
        tracing::debug!(
            page = self.pages_fetched,
            events = events.len(),
            has_more = self.has_more(),
            "search page fetched"
        );
        Ok(Some(events))
    }

    /// Consume the iterator, concatenating every remaining page in order.
    pub async fn drain_all(mut self) -> LogglyResult<Vec<Value>> {
        let mut all = Vec::new();
        while let Some(events) = self.next_page().await? {
            all.extend(events);
        }
        Ok(all)
    }
}

/// Unescape a cursor taken from a `next` link so the transport can encode it
/// exactly once.
fn cursor_param(cursor: &str) -> String {
    match urlencoding::decode(cursor) {
        Ok(decoded) => decoded.into_owned(),
        Err(e) => {
            tracing::warn!(cursor, error = %e, "cursor does not decode to UTF-8, sending as-is");
            cursor.to_string()
        }
    }
}

/// Decide the cursor state from a page's `next` link.
fn next_state(page: &Value) -> CursorState {
    match page.get("next") {
        None | Some(Value::Null) => CursorState::Done,
        Some(Value::String(url)) => match extract_next_token(url) {
            Some(token) if !token.is_empty() => CursorState::Active(token),
            _ => {
                tracing::warn!(next = %url, "next link carries no cursor, ending search");
                CursorState::Done
            }
        },
        Some(other) => {
            tracing::warn!(next = %other, "next link is not a string, ending search");
            CursorState::Done
        }
    }
}

// ── Client endpoints ──────────────────────────────────────────

impl LogglyClient {
    /// Start a lazy search. Nothing is fetched until `next_page()`.
    pub fn paginate(&self, params: &SearchParams) -> LogglyResult<SearchIterator> {
        let query = params.to_query()?;
        let caller = self.caller()?;
        Ok(SearchIterator::new(caller, query))
    }

    /// Run a search and collect every page into one ordered list.
    pub async fn search(&self, params: &SearchParams) -> LogglyResult<Vec<Value>> {
        self.paginate(params)?.drain_all().await
    }
}
