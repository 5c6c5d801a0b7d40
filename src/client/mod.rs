//! SQS client implementation.
//!
//! This module provides the main SQS client interface, its builder, and the
//! shared service context every facade call goes through.

use crate::config::SqsConfig;
use crate::dispatcher::Dispatcher;
use crate::error::SqsError;
use crate::request::{Method, QueryParams, RequestBuilder};
use crate::services::QueuesService;
use crate::signing::{QuerySigner, SignerV2};
use crate::transport::{HttpTransport, ReqwestTransport};
use crate::xml::FromXml;
use once_cell::sync::OnceCell;
use std::sync::Arc;
use url::Url;

/// Read-only state shared by the service handle and every queue handle.
///
/// Never mutated after construction, so concurrent calls may share it freely.
pub struct ServiceContext {
    config: Arc<SqsConfig>,
    builder: RequestBuilder,
    dispatcher: Dispatcher,
}

impl ServiceContext {
    /// Create a new context.
    pub fn new(
        config: Arc<SqsConfig>,
        signer: Arc<dyn QuerySigner>,
        transport: Arc<dyn HttpTransport>,
    ) -> Result<Self, SqsError> {
        let endpoint = config.resolve_endpoint()?;
        let builder = RequestBuilder::new(endpoint, config.api_version.clone(), signer);

        Ok(Self {
            config,
            builder,
            dispatcher: Dispatcher::new(transport),
        })
    }

    /// The client configuration.
    pub fn config(&self) -> &SqsConfig {
        &self.config
    }

    /// The service endpoint.
    pub fn endpoint(&self) -> &Url {
        self.builder.endpoint()
    }

    /// Build, sign and execute one request, decoding the response as `T`.
    pub async fn call<T: FromXml>(
        &self,
        method: Method,
        action: &str,
        path: &str,
        params: QueryParams,
    ) -> Result<T, SqsError> {
        let request = self.builder.build(method, action, path, params).await?;
        self.dispatcher.execute(action, request).await
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("endpoint", &self.endpoint().as_str())
            .field("region", &self.config.region)
            .finish_non_exhaustive()
    }
}

/// SQS client trait.
pub trait SqsClient: Send + Sync {
    /// Get the queues service.
    fn queues(&self) -> &QueuesService;

    /// Get the client configuration.
    fn config(&self) -> &SqsConfig;
}

/// SQS client implementation.
pub struct SqsClientImpl {
    context: Arc<ServiceContext>,

    // Lazy-initialized services
    queues: OnceCell<QueuesService>,
}

impl SqsClientImpl {
    /// Create a new SQS client with the given configuration and transport.
    pub fn new(config: SqsConfig, transport: Arc<dyn HttpTransport>) -> Result<Self, SqsError> {
        let config = Arc::new(config);
        let signer = Arc::new(SignerV2::new(config.credentials_provider.clone()));
        let context = ServiceContext::new(config, signer, transport)?;

        Ok(Self {
            context: Arc::new(context),
            queues: OnceCell::new(),
        })
    }
}

impl SqsClient for SqsClientImpl {
    fn queues(&self) -> &QueuesService {
        self.queues
            .get_or_init(|| QueuesService::new(self.context.clone()))
    }

    fn config(&self) -> &SqsConfig {
        self.context.config()
    }
}

impl std::fmt::Debug for SqsClientImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqsClientImpl")
            .field("context", &self.context)
            .finish_non_exhaustive()
    }
}

/// Builder for SQS client.
pub struct SqsClientBuilder {
    config: Option<SqsConfig>,
    from_env: bool,
    transport: Option<Arc<dyn HttpTransport>>,
}

impl SqsClientBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            config: None,
            from_env: false,
            transport: None,
        }
    }

    /// Use the provided configuration.
    pub fn config(mut self, config: SqsConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Load configuration from environment variables.
    pub fn from_env(mut self) -> Self {
        self.from_env = true;
        self
    }

    /// Use a custom HTTP transport.
    pub fn transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Build the SQS client.
    pub fn build(self) -> Result<SqsClientImpl, SqsError> {
        let config = if let Some(config) = self.config {
            config
        } else if self.from_env {
            SqsConfig::builder().from_env().build()?
        } else {
            SqsConfig::default()
        };

        let transport: Arc<dyn HttpTransport> = match self.transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::from_config(&config)?),
        };

        SqsClientImpl::new(config, transport)
    }
}

impl Default for SqsClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
