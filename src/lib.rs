//! AWS SQS Integration Module
//!
//! Type-safe client for the Amazon SQS query protocol.
//!
//! # Features
//!
//! - **Queues**: list, create, resolve by name, delete
//! - **Messages**: send, receive, delete, change visibility
//! - **Attributes and permissions**: get/set queue attributes, add/remove permissions
//! - **Signature V2**: HMAC-SHA256 query signing
//! - **Structured errors**: service error type, code and request ID on every failure
//! - **Injectable transport**: swap the HTTP layer for tests or custom stacks
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use aws_sqs::SqsClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), aws_sqs::SqsError> {
//!     let client = aws_sqs::create_client_from_env()?;
//!
//!     let queue = client.queues().get("orders").await?;
//!     let id = queue.send_message("hello").await?;
//!     println!("Sent message {}", id);
//!
//!     if let Some(message) = queue.receive_message().await? {
//!         println!("Received: {}", message.body);
//!         queue.delete_message(&message).await?;
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

pub mod client;
pub mod config;
pub mod credentials;
pub mod dispatcher;
pub mod error;
pub mod mocks;
pub mod request;
pub mod services;
pub mod signing;
pub mod transport;
pub mod types;
pub mod xml;

// Re-export main types at crate root
pub use client::{ServiceContext, SqsClient, SqsClientBuilder, SqsClientImpl};
pub use config::{SqsConfig, SqsConfigBuilder};
pub use credentials::{
    AwsCredentials, CredentialsProvider, EnvCredentialsProvider, StaticCredentialsProvider,
};
pub use dispatcher::Dispatcher;
pub use error::{
    ConfigurationError, CredentialsError, DecodeError, ErrorResponse, NetworkError, QueueError,
    RequestError, ServiceErrorKind, SigningError, SqsError,
};
pub use request::{Method, QueryParams, RequestBuilder};
pub use services::{Queue, QueuesService};
pub use signing::{QuerySigner, SignerV2};
pub use transport::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};
pub use types::{
    // Request types
    CreateQueueOptions,
    ReceiveMessageRequest,
    SendMessageRequest,
    // Response types
    CreateQueueOutput,
    EmptyOutput,
    GetQueueAttributesOutput,
    ListQueuesOutput,
    ReceiveMessageOutput,
    SendMessageOutput,
    // Common types
    Attribute,
    Message,
    Permission,
    QueueAttributes,
};
pub use xml::{FromXml, XmlElement, XmlError};

/// Create a new SQS client from environment variables.
///
/// This will attempt to read configuration from:
/// - `AWS_REGION` / `AWS_DEFAULT_REGION` for region
/// - `AWS_ACCESS_KEY_ID` and `AWS_SECRET_ACCESS_KEY` for credentials
/// - `AWS_SESSION_TOKEN` for temporary credentials
/// - `AWS_ENDPOINT_URL_SQS` / `AWS_ENDPOINT_URL` for custom endpoints
///
/// # Example
///
/// ```rust,no_run
/// let client = aws_sqs::create_client_from_env()?;
/// # Ok::<(), aws_sqs::SqsError>(())
/// ```
pub fn create_client_from_env() -> Result<impl SqsClient> {
    SqsClientBuilder::new().from_env().build()
}

/// Create a new SQS client with explicit configuration.
///
/// # Example
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use aws_sqs::{AwsCredentials, SqsConfig, StaticCredentialsProvider};
///
/// let config = SqsConfig::builder()
///     .region("us-west-2")
///     .credentials_provider(Arc::new(StaticCredentialsProvider::new(
///         AwsCredentials::new("AKID", "SECRET"),
///     )))
///     .build()?;
///
/// let client = aws_sqs::create_client(config)?;
/// # Ok::<(), aws_sqs::SqsError>(())
/// ```
pub fn create_client(config: SqsConfig) -> Result<impl SqsClient> {
    SqsClientBuilder::new().config(config).build()
}

/// Result type alias for SQS operations.
pub type Result<T> = std::result::Result<T, SqsError>;
