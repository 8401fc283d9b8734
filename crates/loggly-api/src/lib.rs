//! Client for the Loggly REST API.
//!
//! Provides an explicit `LogglyClient` session (credentials + cached account
//! info), a `Transport` abstraction for testability, event ingestion
//! (single and bulk), and the query endpoints: account info, paginated event
//! search, field statistics, and volume metrics.

pub mod auth;
pub mod client;
pub mod config;
pub mod cursor;
pub mod error;
pub mod mock;
pub mod search;
pub mod stats;
pub mod submit;
pub mod transport;
pub mod types;
pub mod volume;

// Re-export key types for convenience
pub use auth::{AuthMethod, Credentials};
pub use client::{ApiCaller, LogglyClient};
pub use config::LogglyConfig;
pub use cursor::extract_next_token;
pub use error::{LogglyError, LogglyResult};
pub use mock::MockTransport;
pub use search::{SearchIterator, SearchOrder, SearchParams};
pub use stats::{StatKind, StatsQuery};
pub use submit::{BulkEvents, Event, join_tags};
pub use transport::{HttpRequest, HttpResponse, Method, ReqwestTransport, Transport};
pub use types::{AccountInfo, TimeBound};
pub use volume::{GroupBy, MeasurementType, VolumeMetricsQuery};
