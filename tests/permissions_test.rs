//! Integration tests for queue permission operations.

use aws_sqs::mocks::{MockResponse, MockTransport, TestFixtures};
use aws_sqs::types::*;
use aws_sqs::{HttpRequest, Queue, QueryParams, SqsClient, SqsError};
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

#[tokio::test]
async fn test_add_permission() {
    let transport = Arc::new(MockTransport::with_responses(vec![MockResponse::ok_with_body(
        TestFixtures::empty_response_xml("AddPermission"),
    )]));
    let queue = create_test_queue(transport.clone());

    queue
        .add_permission(
            "partners",
            &[
                Permission::new("111122223333", "SendMessage"),
                Permission::new("444455556666", "ReceiveMessage"),
            ],
        )
        .await
        .unwrap();

    let params = recorded_params(&transport.last_request().unwrap());
    assert_eq!(params.get("Action"), Some("AddPermission"));
    assert_eq!(params.get("Label"), Some("partners"));
    assert_eq!(params.get("AWSAccountId.1"), Some("111122223333"));
    assert_eq!(params.get("ActionName.1"), Some("SendMessage"));
    assert_eq!(params.get("AWSAccountId.2"), Some("444455556666"));
    assert_eq!(params.get("ActionName.2"), Some("ReceiveMessage"));
}

#[tokio::test]
async fn test_add_permission_requires_grants() {
    let transport = Arc::new(MockTransport::with_default(MockResponse::ok()));
    let queue = create_test_queue(transport.clone());

    let err = queue.add_permission("partners", &[]).await.unwrap_err();
    assert!(matches!(err, SqsError::Request(_)));

    let err = queue
        .add_permission("", &[Permission::new("111122223333", "*")])
        .await
        .unwrap_err();
    assert!(matches!(err, SqsError::Request(_)));

    assert_eq!(transport.request_count(), 0);
}

#[tokio::test]
async fn test_remove_permission() {
    let transport = Arc::new(MockTransport::with_responses(vec![MockResponse::ok_with_body(
        TestFixtures::empty_response_xml("RemovePermission"),
    )]));
    let queue = create_test_queue(transport.clone());

    queue.remove_permission("partners").await.unwrap();

    let params = recorded_params(&transport.last_request().unwrap());
    assert_eq!(params.get("Action"), Some("RemovePermission"));
    assert_eq!(params.get("Label"), Some("partners"));
}

#[tokio::test]
async fn test_remove_unknown_permission() {
    let transport = Arc::new(MockTransport::with_responses(vec![MockResponse::error(
        400,
        TestFixtures::error_xml(
            "Sender",
            "InvalidParameterValue",
            "Value partners for parameter Label is invalid.",
            "req-8",
        ),
    )]));
    let queue = create_test_queue(transport);

    match queue.remove_permission("partners").await.unwrap_err() {
        SqsError::Service(e) => {
            assert_eq!(e.kind(), aws_sqs::ServiceErrorKind::InvalidParameterValue);
            assert_eq!(e.request_id, "req-8");
        }
        other => panic!("Expected service error, got {:?}", other),
    }
}
