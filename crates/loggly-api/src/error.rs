//! Loggly client error types.

use thiserror::Error;

/// Errors that can occur while talking to the Loggly API.
#[derive(Debug, Error)]
pub enum LogglyError {
    /// No usable credential is configured for an operation that needs one.
    #[error("authentication error: no usable credentials configured")]
    Authentication,

    /// Caller-supplied parameters were rejected before any network call.
    #[error("invalid request: {0}")]
    Request(String),

    /// The service answered with a non-200 status.
    #[error("response error: {status} {reason}: {body}")]
    Response {
        status: u16,
        reason: String,
        body: String,
    },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("decode error: {0}")]
    Decode(String),

    #[error("configuration error: {0}")]
    Config(String),
}

impl LogglyError {
    pub fn is_authentication(&self) -> bool {
        matches!(self, Self::Authentication)
    }

    pub fn is_request(&self) -> bool {
        matches!(self, Self::Request(_))
    }

    pub fn is_response(&self) -> bool {
        matches!(self, Self::Response { .. })
    }

    /// HTTP status carried by a `Response` error.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Response { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Convenience alias for Loggly client results.
pub type LogglyResult<T> = Result<T, LogglyError>;
