//! Mock HTTP transport for testing.

use crate::error::{NetworkError, SqsError};
use crate::transport::{HttpRequest, HttpResponse, HttpTransport};
use async_trait::async_trait;
use bytes::Bytes;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::collections::VecDeque;

/// Mock HTTP response.
#[derive(Debug, Clone)]
pub struct MockResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response headers.
    pub headers: HashMap<String, String>,
    /// Response body.
    pub body: Bytes,
}

impl MockResponse {
    /// Create a response with the given status and body.
    pub fn with_status(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body: body.into(),
        }
    }

    /// Create a 200 response with an empty body.
    pub fn ok() -> Self {
        Self::with_status(200, Bytes::new())
    }

    /// Create a 200 response with a body.
    pub fn ok_with_body(body: impl Into<Bytes>) -> Self {
        Self::with_status(200, body)
    }

    /// Create a failure response, typically carrying an error document.
    pub fn error(status: u16, body: impl Into<Bytes>) -> Self {
        Self::with_status(status, body)
    }

    /// Add a header to the response.
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }
}

/// Mock HTTP transport for testing.
///
/// Replays queued responses in order and records every request it sees.
pub struct MockTransport {
    responses: Mutex<VecDeque<MockResponse>>,
    requests: Mutex<Vec<HttpRequest>>,
    default_response: Option<MockResponse>,
}

impl MockTransport {
    /// Create a new mock transport with no responses.
    pub fn new() -> Self {
        Self::with_responses(Vec::new())
    }

    /// Create a mock transport with queued responses.
    pub fn with_responses(responses: Vec<MockResponse>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
            default_response: None,
        }
    }

    /// Create a mock transport that answers every request with `response`.
    pub fn with_default(response: MockResponse) -> Self {
        Self {
            default_response: Some(response),
            ..Self::new()
        }
    }

    /// Queue a response to return.
    pub fn queue_response(&self, response: MockResponse) {
        self.responses.lock().push_back(response);
    }

    /// Get all recorded requests.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().clone()
    }

    /// Get the number of requests made.
    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }

    /// Get the last request made.
    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests.lock().last().cloned()
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, SqsError> {
        self.requests.lock().push(request);

        let response = self
            .responses
            .lock()
            .pop_front()
            .or_else(|| self.default_response.clone());

        match response {
            Some(mock) => Ok(HttpResponse {
                status: mock.status,
                headers: mock.headers,
                body: mock.body,
            }),
            None => Err(SqsError::Network(NetworkError::ConnectionFailed {
                message: "No mock response available".to_string(),
            })),
        }
    }
}

impl std::fmt::Debug for MockTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockTransport")
            .field("queued_responses", &self.responses.lock().len())
            .field("recorded_requests", &self.requests.lock().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_transport_replays_in_order() {
        let transport = MockTransport::with_responses(vec![
            MockResponse::ok_with_body("first"),
            MockResponse::error(500, "second"),
        ]);

        let first = transport
            .send(HttpRequest::new("GET", "https://example.com/1"))
            .await
            .unwrap();
        let second = transport
            .send(HttpRequest::new("GET", "https://example.com/2"))
            .await
            .unwrap();

        assert_eq!(first.body, Bytes::from("first"));
        assert_eq!(second.status, 500);
        assert_eq!(transport.request_count(), 2);
        assert_eq!(
            transport.last_request().map(|r| r.url),
            Some("https://example.com/2".to_string())
        );
    }

    #[test]
    fn test_mock_response_constructors() {
        let ok = MockResponse::ok_with_body("<R/>");
        assert_eq!(ok.status, 200);
        assert_eq!(ok.body, Bytes::from("<R/>"));
        assert_eq!(MockResponse::ok().status, 200);
        assert!(MockResponse::ok().body.is_empty());

        let redirect = MockResponse::with_status(307, "").with_header("Location", "/elsewhere");
        assert_eq!(redirect.status, 307);
        assert_eq!(
            redirect.headers.get("Location").map(String::as_str),
            Some("/elsewhere")
        );
    }

    #[tokio::test]
    async fn test_mock_transport_exhausted() {
        let transport = MockTransport::new();
        let result = transport
            .send(HttpRequest::new("GET", "https://example.com"))
            .await;
        assert!(matches!(
            result,
            Err(SqsError::Network(NetworkError::ConnectionFailed { .. }))
        ));
    }

    #[tokio::test]
    async fn test_mock_transport_default() {
        let transport = MockTransport::with_default(MockResponse::ok());
        for _ in 0..3 {
            let response = transport
                .send(HttpRequest::new("GET", "https://example.com"))
                .await
                .unwrap();
            assert_eq!(response.status, 200);
        }
    }
}
