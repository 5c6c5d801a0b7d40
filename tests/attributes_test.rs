//! Integration tests for queue attribute operations.

use aws_sqs::mocks::{MockResponse, MockTransport, TestFixtures};
use aws_sqs::types::*;
use aws_sqs::{HttpRequest, Queue, QueryParams, SqsClient, SqsError};
use std::sync::Arc;

fn recorded_params(request: &HttpRequest) -> QueryParams {
    match &request.body {
        Some(body) => QueryParams::parse(std::str::from_utf8(body).unwrap()).unwrap(),
        None => {
            let url = url::Url::parse(&request.url).unwrap();
            QueryParams::parse(url.query().unwrap_or_default()).unwrap()
        }
    }
}

fn create_test_queue(transport: Arc<MockTransport>) -> Queue {
    let client = TestFixtures::client(transport).unwrap();
    client
        .queues()
        .from_url(&TestFixtures::queue_url("alpha"))
        .unwrap()
}

#[tokio::test]
async fn test_get_all_attributes() {
    let transport = Arc::new(MockTransport::with_responses(vec![MockResponse::ok_with_body(
        TestFixtures::get_attributes_xml(&[
            ("VisibilityTimeout", "30"),
            ("ApproximateNumberOfMessages", "7"),
            ("QueueArn", "arn:aws:sqs:us-east-1:123456789012:alpha"),
        ]),
    )]));
    let queue = create_test_queue(transport.clone());

    let attributes = queue.get_attributes(&[]).await.unwrap();
    assert_eq!(attributes.len(), 3);
    assert_eq!(attributes.get(Attribute::VisibilityTimeout), Some("30"));
    assert_eq!(attributes.get(Attribute::ApproximateNumberOfMessages), Some("7"));
    assert_eq!(
        attributes.get(Attribute::QueueArn),
        Some("arn:aws:sqs:us-east-1:123456789012:alpha")
    );

    let request = transport.last_request().unwrap();
    assert_eq!(request.method, "GET");
    let params = recorded_params(&request);
    assert_eq!(params.get("Action"), Some("GetQueueAttributes"));
    assert_eq!(params.get("AttributeName.1"), Some("All"));
    assert!(!params.contains_key("AttributeName.2"));
}

#[tokio::test]
async fn test_get_selected_attributes() {
    let transport = Arc::new(MockTransport::with_responses(vec![MockResponse::ok_with_body(
        TestFixtures::get_attributes_xml(&[("Policy", ""), ("DelaySeconds", "0")]),
    )]));
    let queue = create_test_queue(transport.clone());

    let attributes = queue
        .get_attributes(&[Attribute::Policy, Attribute::DelaySeconds])
        .await
        .unwrap();
    assert_eq!(attributes.get(Attribute::Policy), Some(""));
    assert_eq!(attributes.get(Attribute::DelaySeconds), Some("0"));

    let params = recorded_params(&transport.last_request().unwrap());
    assert_eq!(params.get("AttributeName.1"), Some("Policy"));
    assert_eq!(params.get("AttributeName.2"), Some("DelaySeconds"));
    assert!(!params.contains_key("AttributeName.0"));
}

#[tokio::test]
async fn test_get_policy_document() {
    let policy = r#"{"Version":"2012-10-17","Statement":[{"Effect":"Allow","Principal":"*","Action":"SQS:SendMessage","Condition":{"ArnLike":{"aws:SourceArn":"arn:aws:sns:*:123456789012:a&b<c>"}}}]}"#;
    let transport = Arc::new(MockTransport::with_responses(vec![MockResponse::ok_with_body(
        TestFixtures::get_attributes_xml(&[("Policy", policy)]),
    )]));
    let queue = create_test_queue(transport);

    let attributes = queue.get_attributes(&[Attribute::Policy]).await.unwrap();
    assert_eq!(attributes.get(Attribute::Policy), Some(policy));
}

#[tokio::test]
async fn test_get_attributes_request_path() {
    let transport = Arc::new(MockTransport::with_responses(vec![MockResponse::ok_with_body(
        TestFixtures::get_attributes_xml(&[]),
    )]));
    let queue = create_test_queue(transport.clone());

    let attributes = queue.get_attributes(&[Attribute::QueueArn]).await.unwrap();
    assert!(attributes.is_empty());

    let url = url::Url::parse(&transport.last_request().unwrap().url).unwrap();
    assert_eq!(url.path(), "/123456789012/alpha");
}

#[tokio::test]
async fn test_set_attribute() {
    let transport = Arc::new(MockTransport::with_responses(vec![MockResponse::ok_with_body(
        TestFixtures::empty_response_xml("SetQueueAttributes"),
    )]));
    let queue = create_test_queue(transport.clone());

    queue
        .set_attribute(Attribute::VisibilityTimeout, "90")
        .await
        .unwrap();

    let request = transport.last_request().unwrap();
    assert_eq!(request.method, "POST");
    let params = recorded_params(&request);
    assert_eq!(params.get("Action"), Some("SetQueueAttributes"));
    assert_eq!(params.get("Attribute.Name"), Some("VisibilityTimeout"));
    assert_eq!(params.get("Attribute.Value"), Some("90"));
}

#[tokio::test]
async fn test_set_policy_document() {
    let policy = r#"{"Version":"2012-10-17","Statement":[]}"#;
    let transport = Arc::new(MockTransport::with_responses(vec![MockResponse::ok_with_body(
        TestFixtures::empty_response_xml("SetQueueAttributes"),
    )]));
    let queue = create_test_queue(transport.clone());

    queue.set_attribute(Attribute::Policy, policy).await.unwrap();

    let params = recorded_params(&transport.last_request().unwrap());
    assert_eq!(params.get("Attribute.Value"), Some(policy));
}

#[tokio::test]
async fn test_set_read_only_attribute_rejected() {
    let transport = Arc::new(MockTransport::with_default(MockResponse::ok()));
    let queue = create_test_queue(transport.clone());

    let err = queue
        .set_attribute(Attribute::ApproximateNumberOfMessages, "0")
        .await
        .unwrap_err();
    assert!(matches!(err, SqsError::Request(_)));
    assert_eq!(transport.request_count(), 0);
}

#[tokio::test]
async fn test_set_attribute_invalid_value() {
    let transport = Arc::new(MockTransport::with_responses(vec![MockResponse::error(
        400,
        TestFixtures::error_xml(
            "Sender",
            "InvalidAttributeValue",
            "Invalid value for the parameter VisibilityTimeout.",
            "req-5",
        ),
    )]));
    let queue = create_test_queue(transport);

    let err = queue
        .set_attribute(Attribute::VisibilityTimeout, "-1")
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), Some("InvalidAttributeValue"));
    assert_eq!(err.status_code(), Some(400));
}
