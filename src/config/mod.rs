//! Configuration types for the SQS client.
//!
//! This module provides the `SqsConfig` type for configuring the SQS client,
//! including region, credentials, endpoint and transport settings.

use crate::credentials::{CredentialsProvider, EnvCredentialsProvider};
use crate::error::{ConfigurationError, SqsError};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// API version sent with every request.
pub const DEFAULT_API_VERSION: &str = "2009-02-01";

/// Region used when none is configured.
pub const DEFAULT_REGION: &str = "us-east-1";

/// Configuration for the SQS client.
///
/// Built once and shared read-only by every call made through the client.
#[derive(Clone)]
pub struct SqsConfig {
    /// AWS region (e.g., "us-east-1").
    pub region: String,

    /// Credentials provider.
    pub credentials_provider: Arc<dyn CredentialsProvider>,

    /// Custom endpoint URL (for LocalStack, ElasticMQ and similar).
    pub endpoint: Option<Url>,

    /// Query API version.
    pub api_version: String,

    /// Connection timeout.
    pub connect_timeout: Duration,

    /// Read timeout for a single request.
    pub read_timeout: Duration,

    /// Maximum idle connections per host.
    pub max_connections: u32,

    /// Idle connection timeout.
    pub idle_timeout: Duration,

    /// Verify SSL certificates.
    pub verify_ssl: bool,
}

impl std::fmt::Debug for SqsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqsConfig")
            .field("region", &self.region)
            .field("endpoint", &self.endpoint)
            .field("api_version", &self.api_version)
            .field("connect_timeout", &self.connect_timeout)
            .field("read_timeout", &self.read_timeout)
            .field("max_connections", &self.max_connections)
            .field("verify_ssl", &self.verify_ssl)
            .finish_non_exhaustive()
    }
}

impl Default for SqsConfig {
    fn default() -> Self {
        Self {
            region: DEFAULT_REGION.to_string(),
            credentials_provider: Arc::new(EnvCredentialsProvider::new()),
            endpoint: None,
            api_version: DEFAULT_API_VERSION.to_string(),
            connect_timeout: Duration::from_secs(5),
            read_timeout: Duration::from_secs(30),
            max_connections: 100,
            idle_timeout: Duration::from_secs(90),
            verify_ssl: true,
        }
    }
}

impl SqsConfig {
    /// Create a new configuration builder.
    pub fn builder() -> SqsConfigBuilder {
        SqsConfigBuilder::default()
    }

    /// Resolve the service endpoint.
    pub fn resolve_endpoint(&self) -> Result<Url, SqsError> {
        if let Some(endpoint) = &self.endpoint {
            return Ok(endpoint.clone());
        }

        let url_str = format!("https://sqs.{}.amazonaws.com/", self.region);
        Url::parse(&url_str).map_err(|e| {
            SqsError::Configuration(ConfigurationError::InvalidEndpoint {
                url: url_str,
                details: e.to_string(),
            })
        })
    }
}

/// Builder for SQS configuration.
#[derive(Default)]
pub struct SqsConfigBuilder {
    region: Option<String>,
    credentials_provider: Option<Arc<dyn CredentialsProvider>>,
    endpoint: Option<Url>,
    api_version: Option<String>,
    connect_timeout: Option<Duration>,
    read_timeout: Option<Duration>,
    max_connections: Option<u32>,
    idle_timeout: Option<Duration>,
    verify_ssl: Option<bool>,
}

impl SqsConfigBuilder {
    /// Create a new builder with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the AWS region.
    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Set the credentials provider.
    pub fn credentials_provider(mut self, provider: Arc<dyn CredentialsProvider>) -> Self {
        self.credentials_provider = Some(provider);
        self
    }

    /// Set a custom endpoint URL.
    ///
    /// The endpoint must be a bare scheme, host and port. Queue URLs carry
    /// the resource path, so an endpoint path would be overwritten.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Result<Self, SqsError> {
        let url_str = endpoint.into();
        let url = Url::parse(&url_str).map_err(|e| {
            SqsError::Configuration(ConfigurationError::InvalidEndpoint {
                url: url_str.clone(),
                details: e.to_string(),
            })
        })?;
        check_endpoint(&url)?;
        self.endpoint = Some(url);
        Ok(self)
    }

    /// Set a custom endpoint URL (infallible version).
    ///
    /// The URL is checked when the configuration is built.
    pub fn endpoint_url(mut self, endpoint: Url) -> Self {
        self.endpoint = Some(endpoint);
        self
    }

    /// Override the query API version.
    pub fn api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = Some(version.into());
        self
    }

    /// Set the connection timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Set the read timeout.
    pub fn read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = Some(timeout);
        self
    }

    /// Set the maximum idle connections per host.
    pub fn max_connections(mut self, connections: u32) -> Self {
        self.max_connections = Some(connections);
        self
    }

    /// Set the idle connection timeout.
    pub fn idle_timeout(mut self, timeout: Duration) -> Self {
        self.idle_timeout = Some(timeout);
        self
    }

    /// Enable or disable SSL verification.
    pub fn verify_ssl(mut self, verify: bool) -> Self {
        self.verify_ssl = Some(verify);
        self
    }

    /// Load configuration from environment variables.
    pub fn from_env(mut self) -> Self {
        if let Ok(region) = std::env::var("AWS_REGION") {
            self.region = Some(region);
        } else if let Ok(region) = std::env::var("AWS_DEFAULT_REGION") {
            self.region = Some(region);
        }

        if let Ok(endpoint) = std::env::var("AWS_ENDPOINT_URL_SQS") {
            if let Ok(url) = Url::parse(&endpoint) {
                self.endpoint = Some(url);
            }
        } else if let Ok(endpoint) = std::env::var("AWS_ENDPOINT_URL") {
            if let Ok(url) = Url::parse(&endpoint) {
                self.endpoint = Some(url);
            }
        }

        if let Ok(val) = std::env::var("SQS_INTEGRATION_TIMEOUT_MS") {
            if let Ok(ms) = val.parse() {
                self.read_timeout = Some(Duration::from_millis(ms));
            }
        }

        self
    }

    /// Build the configuration.
    pub fn build(self) -> Result<SqsConfig, SqsError> {
        let defaults = SqsConfig::default();

        let region = self.region.unwrap_or(defaults.region);
        if region.trim().is_empty() {
            return Err(SqsError::Configuration(
                ConfigurationError::InvalidConfiguration {
                    field: "region".to_string(),
                    message: "region must not be empty".to_string(),
                },
            ));
        }

        let read_timeout = self.read_timeout.unwrap_or(defaults.read_timeout);
        if read_timeout.is_zero() {
            return Err(SqsError::Configuration(
                ConfigurationError::InvalidConfiguration {
                    field: "read_timeout".to_string(),
                    message: "read timeout must be greater than zero".to_string(),
                },
            ));
        }

        if let Some(endpoint) = &self.endpoint {
            check_endpoint(endpoint)?;
        }

        Ok(SqsConfig {
            region,
            credentials_provider: self
                .credentials_provider
                .unwrap_or(defaults.credentials_provider),
            endpoint: self.endpoint,
            api_version: self.api_version.unwrap_or(defaults.api_version),
            connect_timeout: self.connect_timeout.unwrap_or(defaults.connect_timeout),
            read_timeout,
            max_connections: self.max_connections.unwrap_or(defaults.max_connections),
            idle_timeout: self.idle_timeout.unwrap_or(defaults.idle_timeout),
            verify_ssl: self.verify_ssl.unwrap_or(defaults.verify_ssl),
        })
    }
}

fn check_endpoint(url: &Url) -> Result<(), SqsError> {
    let details = if url.host_str().is_none() {
        "endpoint has no host"
    } else if url.path() != "/" && !url.path().is_empty() {
        "endpoint must not carry a path"
    } else if url.query().is_some() {
        "endpoint must not carry a query string"
    } else {
        return Ok(());
    };

    Err(SqsError::Configuration(ConfigurationError::InvalidEndpoint {
        url: url.to_string(),
        details: details.to_string(),
    }))
}
