//! Integration tests for message operations on a Queue.

use aws_sqs::mocks::{MockResponse, MockTransport, TestFixtures};
use aws_sqs::types::*;
use aws_sqs::{HttpRequest, Queue, QueryParams, SqsClient, SqsError};
use std::collections::HashMap;
use std::sync::Arc;

fn recorded_params(request: &HttpRequest) -> QueryParams {
    let body = request.body.as_ref().expect("POST request has a body");
    QueryParams::parse(std::str::from_utf8(body).unwrap()).unwrap()
}

fn create_test_queue(transport: Arc<MockTransport>) -> Queue {
    let client = TestFixtures::client(transport).unwrap();
    client
        .queues()
        .from_url(&TestFixtures::queue_url("alpha"))
        .unwrap()
}

fn message(receipt_handle: &str) -> Message {
    Message {
        id: "m-1".to_string(),
        body: "hello".to_string(),
        receipt_handle: receipt_handle.to_string(),
        md5_of_body: None,
        attributes: HashMap::new(),
    }
}

#[tokio::test]
async fn test_send_message() {
    let transport = Arc::new(MockTransport::with_responses(vec![MockResponse::ok_with_body(
        TestFixtures::send_message_xml("abc-123", None),
    )]));
    let queue = create_test_queue(transport.clone());

    let id = queue.send_message("hello world").await.unwrap();
    assert_eq!(id, "abc-123");

    let request = transport.last_request().unwrap();
    assert_eq!(request.method, "POST");
    assert_eq!(
        request.url,
        "https://sqs.us-east-1.amazonaws.com/123456789012/alpha"
    );
    assert_eq!(
        request.headers.get("content-type").map(String::as_str),
        Some("application/x-www-form-urlencoded; charset=utf-8")
    );

    let params = recorded_params(&request);
    assert_eq!(params.get("Action"), Some("SendMessage"));
    assert_eq!(params.get("MessageBody"), Some("hello world"));
    assert_eq!(params.get("SignatureMethod"), Some("HmacSHA256"));
    assert_eq!(params.get("SignatureVersion"), Some("2"));
    assert!(params.contains_key("Timestamp"));
    assert!(params.contains_key("Signature"));
    assert!(!params.contains_key("DelaySeconds"));
}

#[tokio::test]
async fn test_send_message_checks_md5() {
    let transport = Arc::new(MockTransport::with_responses(vec![
        MockResponse::ok_with_body(TestFixtures::send_message_xml(
            "ok-1",
            Some("5eb63bbbe01eeed093cb22bb8f5acdc3"),
        )),
        MockResponse::ok_with_body(TestFixtures::send_message_xml(
            "bad-1",
            Some("d41d8cd98f00b204e9800998ecf8427e"),
        )),
    ]));
    let queue = create_test_queue(transport);

    assert_eq!(queue.send_message("hello world").await.unwrap(), "ok-1");

    let err = queue.send_message("hello world").await.unwrap_err();
    match err {
        SqsError::Decode(e) => assert!(e.message.contains("bad-1")),
        other => panic!("Expected decode error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_send_message_with_delay() {
    let transport = Arc::new(MockTransport::with_responses(vec![MockResponse::ok_with_body(
        TestFixtures::send_message_xml("abc-123", None),
    )]));
    let queue = create_test_queue(transport.clone());

    queue
        .send_message_with(SendMessageRequest::new("later").with_delay_seconds(30))
        .await
        .unwrap();

    let params = recorded_params(&transport.last_request().unwrap());
    assert_eq!(params.get("DelaySeconds"), Some("30"));
    assert_eq!(params.get("MessageBody"), Some("later"));
}

#[tokio::test]
async fn test_send_message_access_denied() {
    let transport = Arc::new(MockTransport::with_responses(vec![MockResponse::error(
        403,
        TestFixtures::error_xml("Sender", "AccessDenied", "no", "req-1"),
    )]));
    let queue = create_test_queue(transport);

    match queue.send_message("hello").await.unwrap_err() {
        SqsError::Service(e) => {
            assert_eq!(e.status_code, 403);
            assert_eq!(e.code, "AccessDenied");
            assert_eq!(e.request_id, "req-1");
            assert_eq!(e.error_type, "Sender");
            assert_eq!(e.message, "no");
        }
        other => panic!("Expected service error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_receive_message() {
    let transport = Arc::new(MockTransport::with_responses(vec![MockResponse::ok_with_body(
        TestFixtures::receive_message_xml(&[("m-1", "payload", "rh-1")]),
    )]));
    let queue = create_test_queue(transport.clone());

    let message = queue.receive_message().await.unwrap().unwrap();
    assert_eq!(message.id, "m-1");
    assert_eq!(message.body, "payload");
    assert_eq!(message.receipt_handle, "rh-1");
    assert!(message.verify_md5());

    let params = recorded_params(&transport.last_request().unwrap());
    assert_eq!(params.get("Action"), Some("ReceiveMessage"));
    assert_eq!(params.get("MaxNumberOfMessages"), Some("1"));
}

#[tokio::test]
async fn test_receive_keeps_edge_whitespace() {
    let transport = Arc::new(MockTransport::with_responses(vec![MockResponse::ok_with_body(
        TestFixtures::receive_message_xml(&[
            ("m-1", "  padded  ", "rh-1"),
            ("m-2", "\n{\"a\":1}\n", "rh-2"),
        ]),
    )]));
    let queue = create_test_queue(transport);

    let messages = queue
        .receive_messages(ReceiveMessageRequest::new().with_max_number_of_messages(2))
        .await
        .unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].body, "  padded  ");
    assert_eq!(messages[1].body, "\n{\"a\":1}\n");
    assert!(messages.iter().all(Message::verify_md5));
}

#[tokio::test]
async fn test_receive_body_with_markup_characters() {
    let body = r#"<order id="7"> fish & 'chips' </order>"#;
    let transport = Arc::new(MockTransport::with_responses(vec![MockResponse::ok_with_body(
        TestFixtures::receive_message_xml(&[("m-1", body, "rh&1")]),
    )]));
    let queue = create_test_queue(transport);

    let message = queue.receive_message().await.unwrap().unwrap();
    assert_eq!(message.body, body);
    assert_eq!(message.receipt_handle, "rh&1");
    assert!(message.verify_md5());
}

#[tokio::test]
async fn test_receive_message_empty_queue() {
    let transport = Arc::new(MockTransport::with_responses(vec![MockResponse::ok_with_body(
        TestFixtures::receive_message_xml(&[]),
    )]));
    let queue = create_test_queue(transport);

    assert!(queue.receive_message().await.unwrap().is_none());
}

#[tokio::test]
async fn test_receive_messages_batch() {
    let transport = Arc::new(MockTransport::with_responses(vec![MockResponse::ok_with_body(
        TestFixtures::receive_message_xml(&[("m-1", "one", "rh-1"), ("m-2", "two", "rh-2")]),
    )]));
    let queue = create_test_queue(transport.clone());

    let request = ReceiveMessageRequest::new()
        .with_max_number_of_messages(10)
        .with_visibility_timeout(60)
        .with_attribute(Attribute::All);
    let messages = queue.receive_messages(request).await.unwrap();

    let ids: Vec<&str> = messages.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, vec!["m-1", "m-2"]);

    let params = recorded_params(&transport.last_request().unwrap());
    assert_eq!(params.get("MaxNumberOfMessages"), Some("10"));
    assert_eq!(params.get("VisibilityTimeout"), Some("60"));
    assert_eq!(params.get("AttributeName.1"), Some("All"));
}

#[tokio::test]
async fn test_receive_messages_rejects_batch_over_limit() {
    let transport = Arc::new(MockTransport::with_default(MockResponse::ok()));
    let queue = create_test_queue(transport.clone());

    let err = queue
        .receive_messages(ReceiveMessageRequest::new().with_max_number_of_messages(11))
        .await
        .unwrap_err();
    assert!(matches!(err, SqsError::Request(_)));
    assert_eq!(transport.request_count(), 0);
}

#[tokio::test]
async fn test_receive_message_corrupt_body() {
    let body = "<ReceiveMessageResponse><ReceiveMessageResult><Message>\
                <MessageId>m-1</MessageId><ReceiptHandle>rh</ReceiptHandle>\
                <MD5OfBody>00000000000000000000000000000000</MD5OfBody><Body>hi</Body>\
                </Message></ReceiveMessageResult></ReceiveMessageResponse>";
    let transport = Arc::new(MockTransport::with_responses(vec![MockResponse::ok_with_body(
        body,
    )]));
    let queue = create_test_queue(transport);

    assert!(matches!(
        queue.receive_message().await.unwrap_err(),
        SqsError::Decode(_)
    ));
}

#[tokio::test]
async fn test_delete_message() {
    let transport = Arc::new(MockTransport::with_responses(vec![MockResponse::ok_with_body(
        TestFixtures::empty_response_xml("DeleteMessage"),
    )]));
    let queue = create_test_queue(transport.clone());

    queue.delete_message(&message("rh+/=1")).await.unwrap();

    let params = recorded_params(&transport.last_request().unwrap());
    assert_eq!(params.get("Action"), Some("DeleteMessage"));
    assert_eq!(params.get("ReceiptHandle"), Some("rh+/=1"));
}

#[tokio::test]
async fn test_delete_message_invalid_receipt() {
    let transport = Arc::new(MockTransport::with_responses(vec![MockResponse::error(
        404,
        TestFixtures::error_xml(
            "Sender",
            "ReceiptHandleIsInvalid",
            "The input receipt handle is invalid.",
            "req-7",
        ),
    )]));
    let queue = create_test_queue(transport);

    match queue.delete_message(&message("stale")).await.unwrap_err() {
        SqsError::Service(e) => {
            assert_eq!(e.kind(), aws_sqs::ServiceErrorKind::ReceiptHandleIsInvalid);
        }
        other => panic!("Expected service error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_delete_message_without_receipt_handle() {
    let transport = Arc::new(MockTransport::with_default(MockResponse::ok()));
    let queue = create_test_queue(transport.clone());

    let err = queue.delete_message(&message("")).await.unwrap_err();
    assert!(matches!(err, SqsError::Request(_)));
    assert_eq!(transport.request_count(), 0);
}

#[tokio::test]
async fn test_change_message_visibility() {
    let transport = Arc::new(MockTransport::with_responses(vec![MockResponse::ok_with_body(
        TestFixtures::empty_response_xml("ChangeMessageVisibility"),
    )]));
    let queue = create_test_queue(transport.clone());

    queue
        .change_message_visibility(&message("rh-1"), 120)
        .await
        .unwrap();

    let params = recorded_params(&transport.last_request().unwrap());
    assert_eq!(params.get("Action"), Some("ChangeMessageVisibility"));
    assert_eq!(params.get("ReceiptHandle"), Some("rh-1"));
    assert_eq!(params.get("VisibilityTimeout"), Some("120"));
}

#[tokio::test]
async fn test_change_message_visibility_out_of_range() {
    let transport = Arc::new(MockTransport::with_default(MockResponse::ok()));
    let queue = create_test_queue(transport.clone());

    let err = queue
        .change_message_visibility(&message("rh-1"), MAX_VISIBILITY_TIMEOUT + 1)
        .await
        .unwrap_err();
    assert!(matches!(err, SqsError::Request(_)));
    assert_eq!(transport.request_count(), 0);
}

#[tokio::test]
async fn test_transport_failure_is_surfaced() {
    let transport = Arc::new(MockTransport::new());
    let queue = create_test_queue(transport);

    assert!(matches!(
        queue.send_message("hello").await.unwrap_err(),
        SqsError::Network(_)
    ));
}
