//! Error types for the SQS integration module.
//!
//! Errors are grouped by where they originate: configuration, credentials and
//! signing (authentication), caller input, the network, the service itself,
//! and response decoding. None of them are retried or swallowed inside the
//! client; every error is returned to the immediate caller.

mod mapping;

pub use mapping::ServiceErrorKind;

use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Maximum number of characters of a response body kept in a [`DecodeError`].
pub const MAX_BODY_SNIPPET: usize = 4096;

/// Top-level error type for the SQS integration.
#[derive(Debug, Error)]
pub enum SqsError {
    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// Credential-related errors.
    #[error("Credentials error: {0}")]
    Credentials(#[from] CredentialsError),

    /// Request signing errors.
    #[error("Signing error: {0}")]
    Signing(#[from] SigningError),

    /// Invalid caller input.
    #[error("Request error: {0}")]
    Request(#[from] RequestError),

    /// Network and transport errors.
    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    /// Error returned by the service with a decodable error body.
    #[error("{0}")]
    Service(#[from] ErrorResponse),

    /// Response body could not be decoded.
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Queue lookup errors.
    #[error("Queue error: {0}")]
    Queue(#[from] QueueError),
}

impl SqsError {
    /// Returns true for authentication failures raised before a request is sent.
    pub fn is_auth_error(&self) -> bool {
        matches!(self, SqsError::Credentials(_) | SqsError::Signing(_))
    }

    /// Returns the HTTP status code if the error came from an HTTP response.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            SqsError::Service(e) => Some(e.status_code),
            SqsError::Decode(e) => e.status,
            _ => None,
        }
    }

    /// Returns the service error code, e.g. `AccessDenied`.
    pub fn error_code(&self) -> Option<&str> {
        match self {
            SqsError::Service(e) => Some(e.code.as_str()),
            _ => None,
        }
    }

    /// Returns the service request ID if available.
    pub fn request_id(&self) -> Option<&str> {
        match self {
            SqsError::Service(e) if !e.request_id.is_empty() => Some(e.request_id.as_str()),
            _ => None,
        }
    }
}

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// Invalid endpoint URL.
    #[error("Invalid endpoint URL: {url}")]
    InvalidEndpoint {
        /// The invalid URL.
        url: String,
        /// Details about the validation error.
        details: String,
    },

    /// Invalid configuration value.
    #[error("Invalid configuration: {field} - {message}")]
    InvalidConfiguration {
        /// The configuration field name.
        field: String,
        /// Error message.
        message: String,
    },
}

/// Credential-related errors.
#[derive(Debug, Error)]
pub enum CredentialsError {
    /// No credentials could be found.
    #[error("Credentials not found: no credentials could be loaded from {source_name}")]
    NotFound {
        /// Name of the provider that was asked.
        source_name: String,
    },

    /// Credentials are present but unusable.
    #[error("Invalid credentials: {message}")]
    Invalid {
        /// Details about why credentials are invalid.
        message: String,
    },
}

/// Signature computation errors.
#[derive(Debug, Error)]
pub enum SigningError {
    /// The request URL has no host to sign.
    #[error("Cannot sign request: URL '{url}' has no host")]
    MissingHost {
        /// The URL that was being signed.
        url: String,
    },

    /// The signing key was rejected.
    #[error("Signature calculation failed: {message}")]
    CalculationFailed {
        /// Details about the calculation error.
        message: String,
    },
}

/// Invalid caller input.
#[derive(Debug, Error)]
pub enum RequestError {
    /// General validation error.
    #[error("Validation error: {message}")]
    Validation {
        /// Details about the validation error.
        message: String,
    },

    /// A queue URL could not be parsed.
    #[error("Invalid queue URL '{url}': {reason}")]
    InvalidQueueUrl {
        /// The offending URL.
        url: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A query string could not be decoded.
    #[error("Invalid query string: {message}")]
    InvalidQueryString {
        /// Details about the decoding error.
        message: String,
    },
}

/// Network and transport errors.
#[derive(Debug, Error)]
pub enum NetworkError {
    /// Connection failed.
    #[error("Connection failed: {message}")]
    ConnectionFailed {
        /// Error message.
        message: String,
    },

    /// Request timed out.
    #[error("Request timed out after {duration:?}")]
    Timeout {
        /// The timeout duration.
        duration: Duration,
    },

    /// TLS/SSL error.
    #[error("TLS error: {message}")]
    TlsError {
        /// Error message.
        message: String,
    },
}

/// Structured error returned by the service for a non-200 response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorResponse {
    /// HTTP status code (403, 400, 503, ...).
    pub status_code: u16,
    /// HTTP status text ("403 Forbidden", ...).
    pub status_text: String,
    /// Service error type (`Sender` or `Receiver`).
    pub error_type: String,
    /// Service error code.
    pub code: String,
    /// Service error message.
    pub message: String,
    /// Request ID for correlation with the service.
    pub request_id: String,
}

impl ErrorResponse {
    /// Classify the service error code.
    pub fn kind(&self) -> ServiceErrorKind {
        ServiceErrorKind::from_code(&self.code)
    }

    /// Returns true if the error was caused by the sender (4xx family).
    pub fn is_sender_fault(&self) -> bool {
        self.error_type == "Sender" || (400..500).contains(&self.status_code)
    }
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SQS Error [code={} status={:?} request_id={:?} sqs_type={:?} sqs_code={:?} sqs_message={:?}]",
            self.status_code,
            self.status_text,
            self.request_id,
            self.error_type,
            self.code,
            self.message
        )
    }
}

impl std::error::Error for ErrorResponse {}

/// A response body that could not be decoded into the expected shape.
#[derive(Debug, Clone, Error)]
#[error("{message} (status={status:?}, body={body:?})")]
pub struct DecodeError {
    /// What went wrong.
    pub message: String,
    /// The raw body, bounded to [`MAX_BODY_SNIPPET`] characters.
    pub body: String,
    /// HTTP status of the response the body came from.
    pub status: Option<u16>,
}

impl DecodeError {
    /// Create a decode error, keeping a bounded prefix of the body.
    pub fn new(message: impl Into<String>, body: &str, status: Option<u16>) -> Self {
        Self {
            message: message.into(),
            body: body.chars().take(MAX_BODY_SNIPPET).collect(),
            status,
        }
    }
}

/// Queue lookup errors.
#[derive(Debug, Error)]
pub enum QueueError {
    /// No queue with exactly this name exists.
    #[error("Queue not found: '{name}'")]
    NotFound {
        /// The requested queue name.
        name: String,
    },
}
