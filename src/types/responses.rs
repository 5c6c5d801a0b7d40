//! Decoded response shapes for SQS operations.
//!
//! Each shape reads its fields from the `<{Action}Result>` element and the
//! request ID from `ResponseMetadata/RequestId`.

use super::common::*;
use crate::xml::{response_request_id, FromXml, XmlElement, XmlError};
use std::collections::HashMap;

/// Response from `ListQueues`.
#[derive(Debug, Clone, Default)]
pub struct ListQueuesOutput {
    /// Full queue URLs.
    pub queue_urls: Vec<String>,
    /// AWS request ID.
    pub request_id: Option<String>,
}

impl FromXml for ListQueuesOutput {
    fn from_xml(root: &XmlElement) -> Result<Self, XmlError> {
        Ok(Self {
            queue_urls: root
                .texts("ListQueuesResult/QueueUrl")
                .into_iter()
                .map(String::from)
                .collect(),
            request_id: response_request_id(root),
        })
    }
}

/// Response from `CreateQueue`.
#[derive(Debug, Clone)]
pub struct CreateQueueOutput {
    /// Full URL of the created queue.
    pub queue_url: String,
    /// AWS request ID.
    pub request_id: Option<String>,
}

impl FromXml for CreateQueueOutput {
    fn from_xml(root: &XmlElement) -> Result<Self, XmlError> {
        Ok(Self {
            queue_url: root.required_text("CreateQueueResult/QueueUrl")?.to_string(),
            request_id: response_request_id(root),
        })
    }
}

/// Response from `SendMessage`.
#[derive(Debug, Clone)]
pub struct SendMessageOutput {
    /// Service-assigned message ID.
    pub message_id: String,
    /// MD5 of the body as received by the service.
    pub md5_of_message_body: Option<String>,
    /// AWS request ID.
    pub request_id: Option<String>,
}

impl FromXml for SendMessageOutput {
    fn from_xml(root: &XmlElement) -> Result<Self, XmlError> {
        Ok(Self {
            message_id: root.required_text("SendMessageResult/MessageId")?.to_string(),
            md5_of_message_body: root.optional_text("SendMessageResult/MD5OfMessageBody"),
            request_id: response_request_id(root),
        })
    }
}

/// Response from `ReceiveMessage`.
#[derive(Debug, Clone, Default)]
pub struct ReceiveMessageOutput {
    /// Received messages, possibly none.
    pub messages: Vec<Message>,
    /// AWS request ID.
    pub request_id: Option<String>,
}

fn parse_message(el: &XmlElement) -> Result<Message, XmlError> {
    let required = |name: &str| {
        el.required_text(name)
            .map(String::from)
            .map_err(|_| XmlError::MissingElement {
                path: format!("ReceiveMessageResult/Message/{}", name),
            })
    };

    let attributes: HashMap<String, String> = el
        .children_named("Attribute")
        .filter_map(|a| Some((a.text("Name")?.to_string(), a.text("Value")?.to_string())))
        .collect();

    Ok(Message {
        id: required("MessageId")?,
        body: required("Body")?,
        receipt_handle: required("ReceiptHandle")?,
        md5_of_body: el.optional_text("MD5OfBody"),
        attributes,
    })
}

impl FromXml for ReceiveMessageOutput {
    fn from_xml(root: &XmlElement) -> Result<Self, XmlError> {
        let messages = root
            .find_all("ReceiveMessageResult/Message")
            .into_iter()
            .map(parse_message)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            messages,
            request_id: response_request_id(root),
        })
    }
}

/// Response from `GetQueueAttributes`.
#[derive(Debug, Clone, Default)]
pub struct GetQueueAttributesOutput {
    /// Returned attributes.
    pub attributes: QueueAttributes,
    /// AWS request ID.
    pub request_id: Option<String>,
}

impl FromXml for GetQueueAttributesOutput {
    fn from_xml(root: &XmlElement) -> Result<Self, XmlError> {
        let entries = root
            .find_all("GetQueueAttributesResult/Attribute")
            .into_iter()
            .map(|a| {
                let name = a.required_text("Name").map_err(|_| XmlError::MissingElement {
                    path: "GetQueueAttributesResult/Attribute/Name".to_string(),
                })?;
                Ok((name.to_string(), a.text("Value").unwrap_or_default().to_string()))
            })
            .collect::<Result<Vec<_>, XmlError>>()?;

        Ok(Self {
            attributes: QueueAttributes { entries },
            request_id: response_request_id(root),
        })
    }
}

/// Response of actions that return only response metadata
/// (`DeleteQueue`, `DeleteMessage`, `SetQueueAttributes`, ...).
#[derive(Debug, Clone, Default)]
pub struct EmptyOutput {
    /// AWS request ID.
    pub request_id: Option<String>,
}

impl FromXml for EmptyOutput {
    fn from_xml(root: &XmlElement) -> Result<Self, XmlError> {
        Ok(Self {
            request_id: response_request_id(root),
        })
    }
}
