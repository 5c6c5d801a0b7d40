//! Queue handle for message, attribute and permission operations.

use super::queue_name;
use crate::client::ServiceContext;
use crate::error::{DecodeError, RequestError, SqsError};
use crate::request::{Method, QueryParams};
use crate::types::*;
use std::sync::Arc;
use url::Url;

fn validation(message: impl Into<String>) -> SqsError {
    SqsError::Request(RequestError::Validation {
        message: message.into(),
    })
}

/// Handle to one queue.
///
/// The resource path is the queue's only identity. The handle caches nothing:
/// every operation is one round trip to the service.
#[derive(Debug, Clone)]
pub struct Queue {
    context: Arc<ServiceContext>,
    path: String,
}

impl Queue {
    pub(crate) fn new(context: Arc<ServiceContext>, path: String) -> Self {
        Self { context, path }
    }

    /// Resource path, e.g. `/123456789012/orders`.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Queue name, the last segment of the path.
    pub fn name(&self) -> &str {
        queue_name(&self.path)
    }

    /// Full queue URL on the configured endpoint.
    pub fn url(&self) -> Url {
        let mut url = self.context.endpoint().clone();
        url.set_path(&self.path);
        url
    }

    /// Delete the queue.
    pub async fn delete(&self) -> Result<(), SqsError> {
        let _: EmptyOutput = self
            .context
            .call(Method::Post, "DeleteQueue", &self.path, QueryParams::new())
            .await?;
        Ok(())
    }

    /// Send a message and return its ID.
    pub async fn send_message(&self, body: &str) -> Result<String, SqsError> {
        self.send_message_with(SendMessageRequest::new(body)).await
    }

    /// Send a message with options and return its ID.
    ///
    /// When the service reports the MD5 of the body it received, it is checked
    /// against the body sent.
    pub async fn send_message_with(&self, request: SendMessageRequest) -> Result<String, SqsError> {
        request.validate()?;

        let mut params = QueryParams::new().with("MessageBody", request.body.as_str());
        if let Some(delay) = request.delay_seconds {
            params.set("DelaySeconds", delay.to_string());
        }

        let output: SendMessageOutput = self
            .context
            .call(Method::Post, "SendMessage", &self.path, params)
            .await?;

        if let Some(reported) = &output.md5_of_message_body {
            let expected = md5_hex(&request.body);
            if !reported.eq_ignore_ascii_case(&expected) {
                return Err(DecodeError::new(
                    format!(
                        "MD5OfMessageBody mismatch for message {}: expected {}, got {}",
                        output.message_id, expected, reported
                    ),
                    "",
                    Some(200),
                )
                .into());
            }
        }

        Ok(output.message_id)
    }

    /// Receive at most one message.
    pub async fn receive_message(&self) -> Result<Option<Message>, SqsError> {
        let request = ReceiveMessageRequest::new().with_max_number_of_messages(1);
        Ok(self.receive_messages(request).await?.into_iter().next())
    }

    /// Receive up to `max_number_of_messages` messages.
    ///
    /// An empty queue yields an empty vector. Every message whose reported
    /// `MD5OfBody` does not match its body is rejected as a decode error.
    pub async fn receive_messages(
        &self,
        request: ReceiveMessageRequest,
    ) -> Result<Vec<Message>, SqsError> {
        request.validate()?;

        let mut params = QueryParams::new();
        if let Some(max) = request.max_number_of_messages {
            params.set("MaxNumberOfMessages", max.to_string());
        }
        if let Some(timeout) = request.visibility_timeout {
            params.set("VisibilityTimeout", timeout.to_string());
        }
        for (i, attribute) in request.attribute_names.iter().enumerate() {
            params.set(format!("AttributeName.{}", i + 1), attribute.as_str());
        }

        let output: ReceiveMessageOutput = self
            .context
            .call(Method::Post, "ReceiveMessage", &self.path, params)
            .await?;

        if let Some(bad) = output.messages.iter().find(|m| !m.verify_md5()) {
            return Err(DecodeError::new(
                format!("MD5OfBody mismatch for message {}", bad.id),
                &bad.body,
                Some(200),
            )
            .into());
        }

        Ok(output.messages)
    }

    /// Delete a received message.
    pub async fn delete_message(&self, message: &Message) -> Result<(), SqsError> {
        let params = receipt_params(message)?;
        let _: EmptyOutput = self
            .context
            .call(Method::Post, "DeleteMessage", &self.path, params)
            .await?;
        Ok(())
    }

    /// Change the visibility timeout of a received message.
    pub async fn change_message_visibility(
        &self,
        message: &Message,
        visibility_timeout: u32,
    ) -> Result<(), SqsError> {
        validate_visibility_timeout(visibility_timeout)?;

        let params = receipt_params(message)?
            .with("VisibilityTimeout", visibility_timeout.to_string());
        let _: EmptyOutput = self
            .context
            .call(Method::Post, "ChangeMessageVisibility", &self.path, params)
            .await?;
        Ok(())
    }

    /// Read queue attributes. An empty slice requests every attribute.
    pub async fn get_attributes(&self, attributes: &[Attribute]) -> Result<QueueAttributes, SqsError> {
        let mut params = QueryParams::new();
        if attributes.is_empty() {
            params.set("AttributeName.1", Attribute::All.as_str());
        } else {
            for (i, attribute) in attributes.iter().enumerate() {
                params.set(format!("AttributeName.{}", i + 1), attribute.as_str());
            }
        }

        let output: GetQueueAttributesOutput = self
            .context
            .call(Method::Get, "GetQueueAttributes", &self.path, params)
            .await?;

        Ok(output.attributes)
    }

    /// Set one queue attribute.
    pub async fn set_attribute(&self, attribute: Attribute, value: &str) -> Result<(), SqsError> {
        if !attribute.is_writable() {
            return Err(validation(format!("attribute {} is read-only", attribute)));
        }

        let params = QueryParams::new()
            .with("Attribute.Name", attribute.as_str())
            .with("Attribute.Value", value);
        let _: EmptyOutput = self
            .context
            .call(Method::Post, "SetQueueAttributes", &self.path, params)
            .await?;
        Ok(())
    }

    /// Grant actions on this queue to other accounts under `label`.
    pub async fn add_permission(
        &self,
        label: &str,
        permissions: &[Permission],
    ) -> Result<(), SqsError> {
        validate_label(label)?;
        if permissions.is_empty() {
            return Err(validation("at least one permission is required"));
        }

        let mut params = QueryParams::new().with("Label", label);
        for (i, permission) in permissions.iter().enumerate() {
            let n = i + 1;
            params.set(format!("AWSAccountId.{}", n), permission.account_id.as_str());
            params.set(format!("ActionName.{}", n), permission.action.as_str());
        }

        let _: EmptyOutput = self
            .context
            .call(Method::Post, "AddPermission", &self.path, params)
            .await?;
        Ok(())
    }

    /// Revoke the permissions granted under `label`.
    pub async fn remove_permission(&self, label: &str) -> Result<(), SqsError> {
        validate_label(label)?;

        let params = QueryParams::new().with("Label", label);
        let _: EmptyOutput = self
            .context
            .call(Method::Post, "RemovePermission", &self.path, params)
            .await?;
        Ok(())
    }
}

fn receipt_params(message: &Message) -> Result<QueryParams, SqsError> {
    if message.receipt_handle.is_empty() {
        return Err(validation(format!(
            "message {} has no receipt handle",
            message.id
        )));
    }
    Ok(QueryParams::new().with("ReceiptHandle", message.receipt_handle.as_str()))
}

fn validate_label(label: &str) -> Result<(), SqsError> {
    if label.is_empty() {
        return Err(validation("permission label must not be empty"));
    }
    Ok(())
}
