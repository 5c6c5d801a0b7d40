//! Common enums and data types for SQS.

use md5::{Digest, Md5};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Queue-level attribute names.
///
/// Requests name attributes by these symbols; responses hand them back as
/// plain `(name, value)` strings without coercion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Attribute {
    /// Every attribute.
    All,
    /// Approximate number of visible messages.
    ApproximateNumberOfMessages,
    /// Approximate number of in-flight messages.
    ApproximateNumberOfMessagesNotVisible,
    /// Approximate number of delayed messages.
    ApproximateNumberOfMessagesDelayed,
    /// Default visibility timeout in seconds.
    VisibilityTimeout,
    /// Queue creation time (epoch seconds).
    CreatedTimestamp,
    /// Last attribute change (epoch seconds).
    LastModifiedTimestamp,
    /// Access policy document.
    Policy,
    /// Maximum message size in bytes.
    MaximumMessageSize,
    /// Message retention period in seconds.
    MessageRetentionPeriod,
    /// Queue ARN.
    QueueArn,
    /// Default delivery delay in seconds.
    DelaySeconds,
    /// Default long-poll wait time in seconds.
    ReceiveMessageWaitTimeSeconds,
    /// Dead-letter queue policy document.
    RedrivePolicy,
}

impl Attribute {
    /// Returns the wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Attribute::All => "All",
            Attribute::ApproximateNumberOfMessages => "ApproximateNumberOfMessages",
            Attribute::ApproximateNumberOfMessagesNotVisible => {
                "ApproximateNumberOfMessagesNotVisible"
            }
            Attribute::ApproximateNumberOfMessagesDelayed => "ApproximateNumberOfMessagesDelayed",
            Attribute::VisibilityTimeout => "VisibilityTimeout",
            Attribute::CreatedTimestamp => "CreatedTimestamp",
            Attribute::LastModifiedTimestamp => "LastModifiedTimestamp",
            Attribute::Policy => "Policy",
            Attribute::MaximumMessageSize => "MaximumMessageSize",
            Attribute::MessageRetentionPeriod => "MessageRetentionPeriod",
            Attribute::QueueArn => "QueueArn",
            Attribute::DelaySeconds => "DelaySeconds",
            Attribute::ReceiveMessageWaitTimeSeconds => "ReceiveMessageWaitTimeSeconds",
            Attribute::RedrivePolicy => "RedrivePolicy",
        }
    }

    /// Returns true if the attribute can be changed with `SetQueueAttributes`.
    pub fn is_writable(&self) -> bool {
        matches!(
            self,
            Attribute::VisibilityTimeout
                | Attribute::Policy
                | Attribute::MaximumMessageSize
                | Attribute::MessageRetentionPeriod
                | Attribute::DelaySeconds
                | Attribute::ReceiveMessageWaitTimeSeconds
                | Attribute::RedrivePolicy
        )
    }
}

impl std::str::FromStr for Attribute {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "All" => Ok(Attribute::All),
            "ApproximateNumberOfMessages" => Ok(Attribute::ApproximateNumberOfMessages),
            "ApproximateNumberOfMessagesNotVisible" => {
                Ok(Attribute::ApproximateNumberOfMessagesNotVisible)
            }
            "ApproximateNumberOfMessagesDelayed" => Ok(Attribute::ApproximateNumberOfMessagesDelayed),
            "VisibilityTimeout" => Ok(Attribute::VisibilityTimeout),
            "CreatedTimestamp" => Ok(Attribute::CreatedTimestamp),
            "LastModifiedTimestamp" => Ok(Attribute::LastModifiedTimestamp),
            "Policy" => Ok(Attribute::Policy),
            "MaximumMessageSize" => Ok(Attribute::MaximumMessageSize),
            "MessageRetentionPeriod" => Ok(Attribute::MessageRetentionPeriod),
            "QueueArn" => Ok(Attribute::QueueArn),
            "DelaySeconds" => Ok(Attribute::DelaySeconds),
            "ReceiveMessageWaitTimeSeconds" => Ok(Attribute::ReceiveMessageWaitTimeSeconds),
            "RedrivePolicy" => Ok(Attribute::RedrivePolicy),
            _ => Err(format!("Unknown queue attribute: {}", s)),
        }
    }
}

impl std::fmt::Display for Attribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Hex-encoded MD5 digest, as used by `MD5OfMessageBody` and `MD5OfBody`.
pub fn md5_hex(data: &str) -> String {
    hex::encode(Md5::digest(data.as_bytes()))
}

/// A received message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Service-assigned message ID.
    pub id: String,
    /// Message body.
    pub body: String,
    /// Receipt handle for this delivery.
    ///
    /// Only valid until the message is deleted or its visibility timeout
    /// expires.
    pub receipt_handle: String,
    /// MD5 of the body as reported by the service.
    pub md5_of_body: Option<String>,
    /// System attributes returned with the message.
    pub attributes: HashMap<String, String>,
}

impl Message {
    /// Returns false only when the service sent a digest that does not match
    /// the body.
    pub fn verify_md5(&self) -> bool {
        match &self.md5_of_body {
            Some(expected) => expected.eq_ignore_ascii_case(&md5_hex(&self.body)),
            None => true,
        }
    }

    /// Get a message attribute by name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}

/// Queue attributes as returned by `GetQueueAttributes`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueAttributes {
    /// `(name, value)` pairs in response order.
    pub entries: Vec<(String, String)>,
}

impl QueueAttributes {
    /// Value of an attribute, if it was returned.
    pub fn get(&self, attribute: Attribute) -> Option<&str> {
        self.get_by_name(attribute.as_str())
    }

    /// Value of an attribute by wire name.
    pub fn get_by_name(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Number of returned attributes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no attributes were returned.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(name, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }
}

/// A grant of one action to one account, for `AddPermission`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    /// AWS account number of the principal.
    pub account_id: String,
    /// Action name, e.g. `SendMessage`, or `*`.
    pub action: String,
}

impl Permission {
    /// Create a new permission.
    pub fn new(account_id: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            account_id: account_id.into(),
            action: action.into(),
        }
    }
}
