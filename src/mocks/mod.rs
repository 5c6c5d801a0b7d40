//! Mock implementations for testing.
//!
//! A mock transport and credentials provider, canned response bodies, and a
//! helper that wires them into a client.

mod credentials;
mod transport;

pub use credentials::MockCredentialsProvider;
pub use transport::{MockResponse, MockTransport};

use crate::client::{SqsClientBuilder, SqsClientImpl};
use crate::config::SqsConfig;
use crate::error::SqsError;
use quick_xml::escape::escape;
use std::sync::Arc;

/// Endpoint used by [`TestFixtures::client`].
pub const TEST_ENDPOINT: &str = "https://sqs.us-east-1.amazonaws.com/";

/// Canned SQS responses for tests.
pub struct TestFixtures;

impl TestFixtures {
    /// A client talking to `transport` with mock credentials.
    pub fn client(transport: Arc<MockTransport>) -> Result<SqsClientImpl, SqsError> {
        let config = SqsConfig::builder()
            .region("us-east-1")
            .credentials_provider(Arc::new(MockCredentialsProvider::new()))
            .endpoint(TEST_ENDPOINT)?
            .build()?;

        SqsClientBuilder::new()
            .config(config)
            .transport(transport)
            .build()
    }

    /// Full URL of a test queue.
    pub fn queue_url(name: &str) -> String {
        format!("{}123456789012/{}", TEST_ENDPOINT, name)
    }

    fn metadata(request_id: &str) -> String {
        format!(
            "<ResponseMetadata><RequestId>{}</RequestId></ResponseMetadata>",
            request_id
        )
    }

    /// `ListQueues` response listing the given URLs.
    pub fn list_queues_xml(urls: &[&str]) -> String {
        let entries: String = urls
            .iter()
            .map(|u| format!("<QueueUrl>{}</QueueUrl>", escape(u)))
            .collect();
        format!(
            r#"<?xml version="1.0"?>
<ListQueuesResponse xmlns="http://queue.amazonaws.com/doc/2009-02-01/"><ListQueuesResult>{}</ListQueuesResult>{}</ListQueuesResponse>"#,
            entries,
            Self::metadata("list-queues-request")
        )
    }

    /// `CreateQueue` response.
    pub fn create_queue_xml(url: &str) -> String {
        format!(
            "<CreateQueueResponse><CreateQueueResult><QueueUrl>{}</QueueUrl></CreateQueueResult>{}</CreateQueueResponse>",
            escape(url),
            Self::metadata("create-queue-request")
        )
    }

    /// `SendMessage` response.
    pub fn send_message_xml(message_id: &str, md5: Option<&str>) -> String {
        let md5 = md5
            .map(|m| format!("<MD5OfMessageBody>{}</MD5OfMessageBody>", m))
            .unwrap_or_default();
        format!(
            "<SendMessageResponse><SendMessageResult>{}<MessageId>{}</MessageId></SendMessageResult>{}</SendMessageResponse>",
            md5,
            escape(message_id),
            Self::metadata("send-message-request")
        )
    }

    /// `ReceiveMessage` response carrying `(id, body, receipt handle)` triples.
    ///
    /// Values are escaped; `MD5OfBody` is the digest of the unescaped body.
    pub fn receive_message_xml(messages: &[(&str, &str, &str)]) -> String {
        let entries: String = messages
            .iter()
            .map(|(id, body, handle)| {
                format!(
                    "<Message><MessageId>{}</MessageId><ReceiptHandle>{}</ReceiptHandle><MD5OfBody>{}</MD5OfBody><Body>{}</Body></Message>",
                    escape(id),
                    escape(handle),
                    crate::types::md5_hex(body),
                    escape(body)
                )
            })
            .collect();
        format!(
            "<ReceiveMessageResponse><ReceiveMessageResult>{}</ReceiveMessageResult>{}</ReceiveMessageResponse>",
            entries,
            Self::metadata("receive-message-request")
        )
    }

    /// `GetQueueAttributes` response.
    pub fn get_attributes_xml(attributes: &[(&str, &str)]) -> String {
        let entries: String = attributes
            .iter()
            .map(|(n, v)| {
                format!(
                    "<Attribute><Name>{}</Name><Value>{}</Value></Attribute>",
                    escape(n),
                    escape(v)
                )
            })
            .collect();
        format!(
            "<GetQueueAttributesResponse><GetQueueAttributesResult>{}</GetQueueAttributesResult>{}</GetQueueAttributesResponse>",
            entries,
            Self::metadata("get-attributes-request")
        )
    }

    /// Response of an action that returns only metadata.
    pub fn empty_response_xml(action: &str) -> String {
        format!(
            "<{0}Response>{1}</{0}Response>",
            action,
            Self::metadata("empty-request")
        )
    }

    /// Error response body.
    pub fn error_xml(error_type: &str, code: &str, message: &str, request_id: &str) -> String {
        format!(
            "<ErrorResponse><Error><Type>{}</Type><Code>{}</Code><Message>{}</Message><Detail/></Error><RequestId>{}</RequestId></ErrorResponse>",
            escape(error_type),
            escape(code),
            escape(message),
            escape(request_id)
        )
    }
}
