//! Signature V2 signer implementation.

use super::*;
use crate::credentials::{AwsCredentials, CredentialsProvider};
use crate::error::SqsError;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::trace;
use url::Url;

/// Trait for query-protocol request signers.
///
/// Signing is a value transform: the caller's parameters go in, and the same
/// parameters plus the authentication fields come out.
#[async_trait]
pub trait QuerySigner: Send + Sync {
    /// Sign the final parameter set of a request.
    ///
    /// Must be called once per request, after every other parameter
    /// (including `Action`, `Timestamp` and `Version`) has been set.
    async fn sign(&self, method: &str, url: &Url, params: QueryParams) -> Result<QueryParams, SqsError>;
}

/// Signature V2 signer backed by a credentials provider.
pub struct SignerV2 {
    credentials_provider: Arc<dyn CredentialsProvider>,
}

impl SignerV2 {
    /// Create a new signer.
    pub fn new(credentials_provider: Arc<dyn CredentialsProvider>) -> Self {
        Self {
            credentials_provider,
        }
    }

    /// Sign with already-resolved credentials.
    pub fn sign_with_credentials(
        method: &str,
        url: &Url,
        mut params: QueryParams,
        credentials: &AwsCredentials,
    ) -> Result<QueryParams, SqsError> {
        credentials.validate()?;

        let host = host_with_port(url).ok_or_else(|| SigningError::MissingHost {
            url: url.to_string(),
        })?;

        params.set("AWSAccessKeyId", credentials.access_key_id());
        params.set("SignatureVersion", SIGNATURE_VERSION);
        params.set("SignatureMethod", SIGNATURE_METHOD);
        if let Some(token) = credentials.session_token() {
            params.set("SecurityToken", token);
        }
        params.remove(SIGNATURE_PARAM);

        let signature = sign_v2(
            method,
            &host,
            url.path(),
            &params,
            credentials.secret_access_key(),
        )?;
        params.set(SIGNATURE_PARAM, signature);

        Ok(params)
    }
}

/// Host as it appears in the `Host` header: lowercase, with the port only
/// when it differs from the scheme default.
fn host_with_port(url: &Url) -> Option<String> {
    let host = url.host_str()?.to_lowercase();
    Some(match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host,
    })
}

#[async_trait]
impl QuerySigner for SignerV2 {
    async fn sign(&self, method: &str, url: &Url, params: QueryParams) -> Result<QueryParams, SqsError> {
        let credentials = self.credentials_provider.get_credentials().await?;
        trace!(
            method = method,
            path = url.path(),
            provider = self.credentials_provider.name(),
            "Signing request"
        );
        Self::sign_with_credentials(method, url, params, &credentials)
    }
}

impl std::fmt::Debug for SignerV2 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignerV2")
            .field("provider", &self.credentials_provider.name())
            .finish_non_exhaustive()
    }
}
