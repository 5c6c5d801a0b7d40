//! Queues service for listing, creating and resolving queues.

use super::{queue_path, Queue};
use crate::client::ServiceContext;
use crate::error::{QueueError, RequestError, SqsError};
use crate::request::{Method, QueryParams};
use crate::types::*;
use std::sync::Arc;
use tracing::debug;

/// Longest queue name the service accepts.
pub const MAX_QUEUE_NAME_LENGTH: usize = 80;

/// Service handle for queue-level operations.
#[derive(Debug, Clone)]
pub struct QueuesService {
    context: Arc<ServiceContext>,
}

impl QueuesService {
    /// Create a new queues service.
    pub fn new(context: Arc<ServiceContext>) -> Self {
        Self { context }
    }

    /// List queues, optionally restricted to names starting with `prefix`.
    ///
    /// Only the first page of results is returned.
    pub async fn list(&self, prefix: Option<&str>) -> Result<Vec<Queue>, SqsError> {
        let mut params = QueryParams::new();
        if let Some(prefix) = prefix {
            params.set("QueueNamePrefix", prefix);
        }

        let output: ListQueuesOutput = self
            .context
            .call(Method::Get, "ListQueues", "/", params)
            .await?;

        output
            .queue_urls
            .iter()
            .map(|url| self.from_url(url))
            .collect()
    }

    /// Create a queue, or return the existing queue of the same name.
    pub async fn create(
        &self,
        name: &str,
        options: CreateQueueOptions,
    ) -> Result<Queue, SqsError> {
        validate_queue_name(name)?;
        options.validate()?;

        let mut params = QueryParams::new().with("QueueName", name);
        if let Some(timeout) = options.default_visibility_timeout {
            params.set("DefaultVisibilityTimeout", timeout.to_string());
        }

        let output: CreateQueueOutput = self
            .context
            .call(Method::Post, "CreateQueue", "/", params)
            .await?;

        self.from_url(&output.queue_url)
    }

    /// Resolve a queue by exact name.
    ///
    /// Lists queues with `name` as prefix and keeps the one whose name matches
    /// exactly; returns [`QueueError::NotFound`] if there is none.
    pub async fn get(&self, name: &str) -> Result<Queue, SqsError> {
        validate_queue_name(name)?;

        let queues = self.list(Some(name)).await?;
        let candidates = queues.len();

        queues
            .into_iter()
            .find(|q| q.name() == name)
            .ok_or_else(|| {
                debug!(queue = name, candidates = candidates, "No queue with exact name");
                SqsError::Queue(QueueError::NotFound {
                    name: name.to_string(),
                })
            })
    }

    /// Address a queue by URL without a round trip.
    pub fn from_url(&self, queue_url: &str) -> Result<Queue, SqsError> {
        Ok(Queue::new(self.context.clone(), queue_path(queue_url)?))
    }
}

fn validate_queue_name(name: &str) -> Result<(), SqsError> {
    let message = if name.is_empty() {
        Some("queue name must not be empty".to_string())
    } else if name.len() > MAX_QUEUE_NAME_LENGTH {
        Some(format!(
            "queue name is {} characters, the limit is {}",
            name.len(),
            MAX_QUEUE_NAME_LENGTH
        ))
    } else if name.contains('/') {
        Some(format!("queue name '{}' must not contain '/'", name))
    } else {
        None
    };

    match message {
        Some(message) => Err(SqsError::Request(RequestError::Validation { message })),
        None => Ok(()),
    }
}
