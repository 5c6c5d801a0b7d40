//! Environment variable credentials provider.

use super::{AwsCredentials, CredentialsProvider};
use crate::error::{CredentialsError, SqsError};
use async_trait::async_trait;
use std::env;

/// Variable holding the access key ID.
pub const AWS_ACCESS_KEY_ID: &str = "AWS_ACCESS_KEY_ID";
/// Variable holding the secret access key.
pub const AWS_SECRET_ACCESS_KEY: &str = "AWS_SECRET_ACCESS_KEY";
/// Variable holding the optional session token.
pub const AWS_SESSION_TOKEN: &str = "AWS_SESSION_TOKEN";

/// Credentials provider that reads from environment variables.
///
/// This provider looks for the following environment variables:
/// - `AWS_ACCESS_KEY_ID`: The access key ID
/// - `AWS_SECRET_ACCESS_KEY`: The secret access key
/// - `AWS_SESSION_TOKEN`: Optional session token for temporary credentials
#[derive(Debug, Clone, Default)]
pub struct EnvCredentialsProvider {
    access_key_var: Option<String>,
    secret_key_var: Option<String>,
    session_token_var: Option<String>,
}

impl EnvCredentialsProvider {
    /// Create a new environment credentials provider with default variable names.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a provider with custom variable names.
    pub fn with_vars(
        access_key_var: impl Into<String>,
        secret_key_var: impl Into<String>,
        session_token_var: Option<String>,
    ) -> Self {
        Self {
            access_key_var: Some(access_key_var.into()),
            secret_key_var: Some(secret_key_var.into()),
            session_token_var,
        }
    }

    fn access_key_var(&self) -> &str {
        self.access_key_var.as_deref().unwrap_or(AWS_ACCESS_KEY_ID)
    }

    fn secret_key_var(&self) -> &str {
        self.secret_key_var.as_deref().unwrap_or(AWS_SECRET_ACCESS_KEY)
    }

    fn session_token_var(&self) -> &str {
        self.session_token_var.as_deref().unwrap_or(AWS_SESSION_TOKEN)
    }

    fn read_required(&self, var: &str) -> Result<String, SqsError> {
        let value = env::var(var).map_err(|_| {
            SqsError::Credentials(CredentialsError::NotFound {
                source_name: format!("environment variable {}", var),
            })
        })?;

        if value.is_empty() {
            return Err(SqsError::Credentials(CredentialsError::Invalid {
                message: format!("{} is empty", var),
            }));
        }

        Ok(value)
    }
}

#[async_trait]
impl CredentialsProvider for EnvCredentialsProvider {
    async fn get_credentials(&self) -> Result<AwsCredentials, SqsError> {
        let access_key_id = self.read_required(self.access_key_var())?;
        let secret_access_key = self.read_required(self.secret_key_var())?;

        let session_token = env::var(self.session_token_var())
            .ok()
            .filter(|s| !s.is_empty());

        Ok(match session_token {
            Some(token) => AwsCredentials::with_session_token(access_key_id, secret_access_key, token),
            None => AwsCredentials::new(access_key_id, secret_access_key),
        })
    }

    fn name(&self) -> &'static str {
        "environment"
    }
}
