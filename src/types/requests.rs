//! Request options for SQS operations.

use super::common::*;
use crate::error::{RequestError, SqsError};

/// Largest batch `ReceiveMessage` accepts.
pub const MAX_RECEIVE_BATCH: u32 = 10;

/// Longest delivery delay in seconds.
pub const MAX_DELAY_SECONDS: u32 = 900;

/// Longest visibility timeout in seconds (12 hours).
pub const MAX_VISIBILITY_TIMEOUT: u32 = 43_200;

fn validation(message: String) -> SqsError {
    SqsError::Request(RequestError::Validation { message })
}

pub(crate) fn validate_visibility_timeout(timeout: u32) -> Result<(), SqsError> {
    if timeout > MAX_VISIBILITY_TIMEOUT {
        return Err(validation(format!(
            "visibility timeout {} exceeds {} seconds",
            timeout, MAX_VISIBILITY_TIMEOUT
        )));
    }
    Ok(())
}

/// Options for `CreateQueue`.
#[derive(Debug, Clone, Default)]
pub struct CreateQueueOptions {
    /// Visibility timeout applied to messages of the new queue.
    pub default_visibility_timeout: Option<u32>,
}

impl CreateQueueOptions {
    /// Create empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the default visibility timeout in seconds.
    pub fn with_default_visibility_timeout(mut self, seconds: u32) -> Self {
        self.default_visibility_timeout = Some(seconds);
        self
    }

    pub(crate) fn validate(&self) -> Result<(), SqsError> {
        if let Some(timeout) = self.default_visibility_timeout {
            validate_visibility_timeout(timeout)?;
        }
        Ok(())
    }
}

/// Request to send a message.
#[derive(Debug, Clone)]
pub struct SendMessageRequest {
    /// Message body.
    pub body: String,
    /// Delivery delay in seconds.
    pub delay_seconds: Option<u32>,
}

impl SendMessageRequest {
    /// Create a new send message request.
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            delay_seconds: None,
        }
    }

    /// Delay delivery of the message.
    pub fn with_delay_seconds(mut self, seconds: u32) -> Self {
        self.delay_seconds = Some(seconds);
        self
    }

    pub(crate) fn validate(&self) -> Result<(), SqsError> {
        if let Some(delay) = self.delay_seconds {
            if delay > MAX_DELAY_SECONDS {
                return Err(validation(format!(
                    "delay {} exceeds {} seconds",
                    delay, MAX_DELAY_SECONDS
                )));
            }
        }
        Ok(())
    }
}

/// Request to receive messages.
#[derive(Debug, Clone, Default)]
pub struct ReceiveMessageRequest {
    /// Maximum number of messages to return (1 to 10).
    pub max_number_of_messages: Option<u32>,
    /// Visibility timeout for the returned messages.
    pub visibility_timeout: Option<u32>,
    /// Message system attributes to return.
    pub attribute_names: Vec<Attribute>,
}

impl ReceiveMessageRequest {
    /// Create a new receive request with service defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of messages.
    pub fn with_max_number_of_messages(mut self, max: u32) -> Self {
        self.max_number_of_messages = Some(max);
        self
    }

    /// Set the visibility timeout in seconds.
    pub fn with_visibility_timeout(mut self, seconds: u32) -> Self {
        self.visibility_timeout = Some(seconds);
        self
    }

    /// Request an attribute with each message.
    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        self.attribute_names.push(attribute);
        self
    }

    pub(crate) fn validate(&self) -> Result<(), SqsError> {
        if let Some(max) = self.max_number_of_messages {
            if !(1..=MAX_RECEIVE_BATCH).contains(&max) {
                return Err(validation(format!(
                    "max_number_of_messages must be between 1 and {}, got {}",
                    MAX_RECEIVE_BATCH, max
                )));
            }
        }
        if let Some(timeout) = self.visibility_timeout {
            validate_visibility_timeout(timeout)?;
        }
        Ok(())
    }
}
