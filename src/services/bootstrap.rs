use crate::db::{apply_schema, Connector, ScopedConnection};
use crate::error::BootstrapError;
use crate::models::bootstrap::BootstrapResponse;
use crate::services::secrets::{resolve_credentials, SecretStore};

/// What a successful run ensured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapReport {
    pub tables: Vec<&'static str>,
}

/// Resolves credentials, connects, and applies the schema once per call.
///
/// Holds no per-run state, so concurrent calls each get their own secret
/// fetch and their own connection.
pub struct BootstrapService<S, C> {
    secrets: S,
    connector: C,
    secret_id: Option<String>,
}

impl<S, C> BootstrapService<S, C>
where
    S: SecretStore,
    C: Connector,
{
    pub fn new(secrets: S, connector: C, secret_id: Option<String>) -> Self {
        Self {
            secrets,
            connector,
            secret_id,
        }
    }

    pub fn secret_id(&self) -> Option<&str> {
        self.secret_id.as_deref()
    }

    pub fn connector(&self) -> &C {
        &self.connector
    }

    pub fn secrets(&self) -> &S {
        &self.secrets
    }

    pub async fn run(&self) -> Result<BootstrapReport, BootstrapError> {
        tracing::info!(secret_id = self.secret_id().unwrap_or(""), "Resolving database credentials");
        let credentials = resolve_credentials(&self.secrets, self.secret_id()).await?;

        let mut scoped = ScopedConnection::open(&self.connector, &credentials).await?;
        let outcome = apply_schema(scoped.get_mut()).await;
        scoped.release().await;

        let tables = outcome?;
        Ok(BootstrapReport { tables })
    }

    /// Run and fold every failure into an error response.
    pub async fn invoke(&self) -> BootstrapResponse {
        match self.run().await {
            Ok(report) => {
                tracing::info!(tables = ?report.tables, "Schema bootstrap complete");
                BootstrapResponse::success()
            }
            Err(e) => {
                tracing::error!(kind = e.kind(), "Error: {}", e);
                BootstrapResponse::error(e.to_string())
            }
        }
    }
}
