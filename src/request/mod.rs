//! Request construction.
//!
//! Turns an action name, a resource path and a parameter mapping into a
//! signed [`HttpRequest`]. The mandatory `Action`, `Timestamp` and `Version`
//! parameters are set before signing; the signature covers the final
//! parameter set.

mod params;

pub use params::{uri_encode, QueryParams};

use crate::error::{RequestError, SqsError};
use crate::signing::QuerySigner;
use crate::transport::HttpRequest;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use url::Url;

/// Wire format of the `Timestamp` parameter.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Content type of form-encoded POST bodies.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded; charset=utf-8";

/// HTTP methods used by the query protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// Parameters travel in the URL query string.
    Get,
    /// Parameters travel in a form-encoded body.
    Post,
}

impl Method {
    /// The method name as sent on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Format a timestamp for the `Timestamp` parameter.
pub fn format_timestamp(dt: &DateTime<Utc>) -> String {
    dt.format(TIMESTAMP_FORMAT).to_string()
}

/// Builds signed query-protocol requests against one endpoint.
pub struct RequestBuilder {
    endpoint: Url,
    api_version: String,
    signer: Arc<dyn QuerySigner>,
}

impl RequestBuilder {
    /// Create a new request builder.
    pub fn new(endpoint: Url, api_version: impl Into<String>, signer: Arc<dyn QuerySigner>) -> Self {
        Self {
            endpoint,
            api_version: api_version.into(),
            signer,
        }
    }

    /// The endpoint requests are sent to.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Build a request stamped with the current time.
    ///
    /// The timestamp is taken per call; built requests must not be cached
    /// and replayed, as the service rejects stale timestamps.
    pub async fn build(
        &self,
        method: Method,
        action: &str,
        path: &str,
        params: QueryParams,
    ) -> Result<HttpRequest, SqsError> {
        self.build_at(method, action, path, params, Utc::now()).await
    }

    /// Build a request stamped with the given time.
    pub async fn build_at(
        &self,
        method: Method,
        action: &str,
        path: &str,
        mut params: QueryParams,
        timestamp: DateTime<Utc>,
    ) -> Result<HttpRequest, SqsError> {
        let mut url = self.resource_url(path)?;

        params.set("Action", action);
        params.set("Timestamp", format_timestamp(&timestamp));
        params.set("Version", self.api_version.as_str());

        let signed = self.signer.sign(method.as_str(), &url, params).await?;
        let encoded = signed.encode();

        let request = match method {
            Method::Get => {
                url.set_query(Some(&encoded));
                HttpRequest::new(method.as_str(), url.as_str())
            }
            Method::Post => HttpRequest::new(method.as_str(), url.as_str())
                .with_header("content-type", FORM_CONTENT_TYPE)
                .with_header("content-length", encoded.len().to_string())
                .with_body(encoded),
        };

        Ok(request)
    }

    fn resource_url(&self, path: &str) -> Result<Url, SqsError> {
        if !path.starts_with('/') {
            return Err(SqsError::Request(RequestError::Validation {
                message: format!("resource path '{}' must start with '/'", path),
            }));
        }

        let mut url = self.endpoint.clone();
        url.set_path(path);
        url.set_query(None);
        Ok(url)
    }
}

impl std::fmt::Debug for RequestBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestBuilder")
            .field("endpoint", &self.endpoint.as_str())
            .field("api_version", &self.api_version)
            .finish_non_exhaustive()
    }
}
