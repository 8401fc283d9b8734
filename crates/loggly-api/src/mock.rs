//! Mock transport for testing without a live Loggly account.
//!
//! Serves scripted responses in FIFO order and records every request for
//! assertion in tests.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

use crate::error::{LogglyError, LogglyResult};
use crate::transport::{HttpRequest, HttpResponse, Transport};

/// Mock implementation of the `Transport` trait.
///
/// Thread-safe via `Mutex` (fine for test contexts).
pub struct MockTransport {
    responses: Mutex<VecDeque<HttpResponse>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Create a mock pre-loaded with responses.
    pub fn with_responses(responses: Vec<HttpResponse>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queue an additional response.
    pub fn queue_response(&self, response: HttpResponse) {
        self.responses.lock().unwrap().push_back(response);
    }

    /// Queue a 200 response with a JSON body.
    pub fn queue_json(&self, body: serde_json::Value) {
        self.queue_response(HttpResponse::ok_json(&body));
    }

    /// Get copies of all requests that were sent.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Get the last sent request, if any.
    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests.lock().unwrap().last().cloned()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Number of scripted responses not yet served.
    pub fn pending_responses(&self) -> usize {
        self.responses.lock().unwrap().len()
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: HttpRequest) -> LogglyResult<HttpResponse> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| LogglyError::Transport("mock transport has no queued response".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn serves_responses_in_order() {
        let mock = MockTransport::new();
        mock.queue_response(HttpResponse::new(200, "OK", "first"));
        mock.queue_response(HttpResponse::new(404, "Not Found", "second"));

        let a = mock.send(HttpRequest::get("http://a")).await.unwrap();
        let b = mock.send(HttpRequest::get("http://b")).await.unwrap();
        assert_eq!(a.body, "first");
        assert_eq!(b.status, 404);
        assert_eq!(mock.pending_responses(), 0);
    }

    #[tokio::test]
    async fn records_requests() {
        let mock = MockTransport::with_responses(vec![HttpResponse::new(200, "OK", "")]);
        assert!(mock.last_request().is_none());

        mock.send(HttpRequest::post("http://x").body("payload"))
            .await
            .unwrap();
        let last = mock.last_request().unwrap();
        assert_eq!(last.url, "http://x");
        assert_eq!(last.body.as_deref(), Some("payload"));
        assert_eq!(mock.request_count(), 1);
    }

    #[tokio::test]
    async fn empty_queue_is_transport_error() {
        let mock = MockTransport::new();
        let result = mock.send(HttpRequest::get("http://x")).await;
        assert!(matches!(result, Err(LogglyError::Transport(_))));
    }
}
