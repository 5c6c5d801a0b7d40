//! Request execution and response decoding.
//!
//! One call is one HTTP round trip. A 200 response is decoded into the
//! caller's response shape; every other status is decoded into an
//! [`ErrorResponse`]. Bodies that cannot be decoded either way surface as a
//! [`DecodeError`] carrying the raw body.

use crate::error::{DecodeError, ErrorResponse, SqsError};
use crate::transport::{HttpRequest, HttpResponse, HttpTransport};
use crate::xml::{self, FromXml, XmlElement};
use std::sync::Arc;
use tracing::{debug, warn};

/// Executes signed requests over an injected transport.
#[derive(Clone)]
pub struct Dispatcher {
    transport: Arc<dyn HttpTransport>,
}

impl Dispatcher {
    /// Create a new dispatcher.
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self { transport }
    }

    /// Send a request and decode the response as `T`.
    pub async fn execute<T: FromXml>(
        &self,
        action: &str,
        request: HttpRequest,
    ) -> Result<T, SqsError> {
        debug!(action = action, method = %request.method, url = %request.url, "Sending request");

        let response = self.transport.send(request).await?;

        debug!(action = action, status = response.status, "Received response");

        if response.status == 200 {
            decode_success(&response)
        } else {
            let error = decode_error(&response)?;
            warn!(
                action = action,
                status = error.status_code,
                code = %error.code,
                request_id = %error.request_id,
                "Service returned an error"
            );
            Err(SqsError::Service(error))
        }
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher").finish_non_exhaustive()
    }
}

fn body_str(response: &HttpResponse) -> Result<&str, DecodeError> {
    std::str::from_utf8(&response.body).map_err(|e| {
        DecodeError::new(
            format!("response body is not valid UTF-8: {}", e),
            &String::from_utf8_lossy(&response.body),
            Some(response.status),
        )
    })
}

fn decode_success<T: FromXml>(response: &HttpResponse) -> Result<T, SqsError> {
    let body = body_str(response)?;
    XmlElement::parse(body)
        .and_then(|root| T::from_xml(&root))
        .map_err(|e| DecodeError::new(e.to_string(), body, Some(response.status)).into())
}

/// Canonical status text, e.g. `403 Forbidden`.
pub fn status_text(status: u16) -> String {
    match http::StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
    {
        Some(reason) => format!("{} {}", status, reason),
        None => status.to_string(),
    }
}

fn decode_error(response: &HttpResponse) -> Result<ErrorResponse, SqsError> {
    let body = body_str(response)?;
    let mut error = XmlElement::parse(body)
        .and_then(|root| xml::parse_error_response(&root))
        .map_err(|e| {
            SqsError::Decode(DecodeError::new(
                format!("could not decode error body: {}", e),
                body,
                Some(response.status),
            ))
        })?;

    error.status_code = response.status;
    error.status_text = status_text(response.status);
    if error.request_id.is_empty() {
        if let Some(id) = response.request_id() {
            error.request_id = id.to_string();
        }
    }

    Ok(error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::{MockResponse, MockTransport, TestFixtures};
    use crate::types::{EmptyOutput, SendMessageOutput};

    fn dispatcher(response: MockResponse) -> Dispatcher {
        Dispatcher::new(Arc::new(MockTransport::with_responses(vec![response])))
    }

    fn request() -> HttpRequest {
        HttpRequest::new("POST", "https://sqs.us-east-1.amazonaws.com/123/alpha")
    }

    #[test]
    fn test_status_text() {
        assert_eq!(status_text(403), "403 Forbidden");
        assert_eq!(status_text(503), "503 Service Unavailable");
        assert_eq!(status_text(599), "599");
    }

    #[tokio::test]
    async fn test_success_is_decoded() {
        let d = dispatcher(MockResponse::ok_with_body(TestFixtures::send_message_xml(
            "abc-123", None,
        )));
        let output: SendMessageOutput = d.execute("SendMessage", request()).await.unwrap();
        assert_eq!(output.message_id, "abc-123");
    }

    #[tokio::test]
    async fn test_error_status_is_decoded() {
        let d = dispatcher(MockResponse::error(
            403,
            TestFixtures::error_xml("Sender", "AccessDenied", "no", "req-1"),
        ));
        let err = d
            .execute::<EmptyOutput>("SendMessage", request())
            .await
            .unwrap_err();

        match err {
            SqsError::Service(e) => {
                assert_eq!(e.status_code, 403);
                assert_eq!(e.status_text, "403 Forbidden");
                assert_eq!(e.error_type, "Sender");
                assert_eq!(e.code, "AccessDenied");
                assert_eq!(e.message, "no");
                assert_eq!(e.request_id, "req-1");
            }
            other => panic!("expected service error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_non_200_success_status_is_an_error() {
        let d = dispatcher(MockResponse::error(
            204,
            TestFixtures::error_xml("Receiver", "Odd", "unexpected", "req-2"),
        ));
        let err = d.execute::<EmptyOutput>("DeleteQueue", request()).await.unwrap_err();
        assert_eq!(err.status_code(), Some(204));
    }

    #[tokio::test]
    async fn test_malformed_success_body() {
        let d = dispatcher(MockResponse::ok_with_body("<SendMessageResponse><oops>"));
        let err = d
            .execute::<SendMessageOutput>("SendMessage", request())
            .await
            .unwrap_err();
        match err {
            SqsError::Decode(e) => {
                assert_eq!(e.body, "<SendMessageResponse><oops>");
                assert_eq!(e.status, Some(200));
            }
            other => panic!("expected decode error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_undecodable_error_body() {
        let d = dispatcher(MockResponse::error(502, "<html>Bad Gateway</html>"));
        let err = d.execute::<EmptyOutput>("ListQueues", request()).await.unwrap_err();
        match err {
            SqsError::Decode(e) => {
                assert_eq!(e.status, Some(502));
                assert!(e.body.contains("Bad Gateway"));
            }
            other => panic!("expected decode error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_invalid_utf8_body() {
        let d = dispatcher(MockResponse::ok_with_body(vec![0xff, 0xfe, 0x3c]));
        let err = d.execute::<EmptyOutput>("ListQueues", request()).await.unwrap_err();
        assert!(matches!(err, SqsError::Decode(_)));
    }

    #[tokio::test]
    async fn test_request_id_header_fallback() {
        let body = "<ErrorResponse><Error><Type>Receiver</Type><Code>InternalError</Code>\
                    <Message>boom</Message></Error></ErrorResponse>";
        let d = dispatcher(
            MockResponse::error(500, body).with_header("x-amzn-RequestId", "hdr-42"),
        );
        let err = d.execute::<EmptyOutput>("ListQueues", request()).await.unwrap_err();
        assert_eq!(err.request_id(), Some("hdr-42"));
    }
}
