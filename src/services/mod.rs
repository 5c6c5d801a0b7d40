//! SQS service implementations.
//!
//! - Queues: list, create, look up and address queues
//! - Queue: message, attribute and permission operations on one queue

mod queue;
mod queues;

pub use queue::Queue;
pub use queues::QueuesService;

use crate::error::{RequestError, SqsError};
use url::Url;

/// Extract the resource path that identifies a queue from its URL.
///
/// Accepts a full queue URL or an absolute path; scheme and host are
/// discarded.
pub fn queue_path(queue_url: &str) -> Result<String, SqsError> {
    let invalid = |reason: &str| {
        SqsError::Request(RequestError::InvalidQueueUrl {
            url: queue_url.to_string(),
            reason: reason.to_string(),
        })
    };

    let path = if queue_url.starts_with('/') {
        queue_url.to_string()
    } else {
        Url::parse(queue_url)
            .map_err(|e| invalid(&e.to_string()))?
            .path()
            .to_string()
    };

    if path.trim_matches('/').is_empty() {
        return Err(invalid("URL has no queue path"));
    }

    Ok(path)
}

/// Last path segment of a queue path, i.e. the queue name.
pub fn queue_name(path: &str) -> &str {
    path.trim_end_matches('/').rsplit('/').next().unwrap_or_default()
}
