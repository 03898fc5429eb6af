//! Credential resolution from a secret store.
//!
//! Credentials are fetched on every invocation and never cached, so a rotated
//! secret is picked up by the next bootstrap run.

use async_trait::async_trait;
use aws_config::meta::region::RegionProviderChain;
use aws_config::BehaviorVersion;
use aws_sdk_secretsmanager::config::Region;
use aws_sdk_secretsmanager::error::DisplayErrorContext;
use aws_sdk_secretsmanager::Client;

use crate::config::Config;
use crate::error::BootstrapError;
use crate::models::credentials::DbCredentials;

#[async_trait]
pub trait SecretStore: Send + Sync {
    /// Fetch the raw string payload of a secret.
    ///
    /// Not-found and unreachable stores map to `SecretUnavailable`; a secret
    /// without a string payload maps to `MalformedSecret`.
    async fn fetch_secret_string(&self, secret_id: &str) -> Result<String, BootstrapError>;
}

/// AWS Secrets Manager backed store.
#[derive(Debug, Clone)]
pub struct SecretsManagerStore {
    client: Client,
}

impl SecretsManagerStore {
    /// Build the client. Region priority: config > env/profile chain > us-east-1.
    pub async fn from_config(config: &Config) -> Self {
        let region_provider =
            RegionProviderChain::first_try(config.aws_region.clone().map(Region::new))
                .or_default_provider()
                .or_else("us-east-1");

        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .region(region_provider)
            .load()
            .await;

        let mut builder = aws_sdk_secretsmanager::config::Builder::from(&sdk_config);
        if let Some(url) = &config.secrets_endpoint_url {
            builder = builder.endpoint_url(url);
        }

        Self {
            client: Client::from_conf(builder.build()),
        }
    }
}

#[async_trait]
impl SecretStore for SecretsManagerStore {
    async fn fetch_secret_string(&self, secret_id: &str) -> Result<String, BootstrapError> {
        let output = self
            .client
            .get_secret_value()
            .secret_id(secret_id)
            .send()
            .await
            .map_err(|e| {
                BootstrapError::secret_unavailable(secret_id, DisplayErrorContext(&e).to_string())
            })?;

        output
            .secret_string()
            .map(str::to_owned)
            .ok_or_else(|| BootstrapError::MalformedSecret("secret has no string payload".into()))
    }
}

/// Resolve the credential bundle named by `secret_id`.
pub async fn resolve_credentials<S>(
    store: &S,
    secret_id: Option<&str>,
) -> Result<DbCredentials, BootstrapError>
where
    S: SecretStore + ?Sized,
{
    let secret_id = secret_id
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| BootstrapError::secret_unavailable("<unset>", "SECRET_ID is not configured"))?;

    let raw = store.fetch_secret_string(secret_id).await?;
    let credentials = DbCredentials::parse(&raw)?;
    tracing::debug!(secret_id, credentials = ?credentials, "Resolved database credentials");
    Ok(credentials)
}
