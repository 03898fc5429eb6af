use thiserror::Error;

/// Everything that can stop a bootstrap invocation.
#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("secret unavailable ({secret_id}): {reason}")]
    SecretUnavailable { secret_id: String, reason: String },

    #[error("malformed secret: {0}")]
    MalformedSecret(String),

    #[error("database connection failed: {0}")]
    ConnectionFailed(#[source] sqlx::Error),

    #[error("failed to create table {table}: {source}")]
    SchemaApplyFailed {
        table: &'static str,
        #[source]
        source: sqlx::Error,
    },
}

impl BootstrapError {
    pub fn secret_unavailable(secret_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::SecretUnavailable {
            secret_id: secret_id.into(),
            reason: reason.into(),
        }
    }

    /// Stable name of the error kind, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::SecretUnavailable { .. } => "secret_unavailable",
            Self::MalformedSecret(_) => "malformed_secret",
            Self::ConnectionFailed(_) => "connection_failed",
            Self::SchemaApplyFailed { .. } => "schema_apply_failed",
        }
    }
}

impl From<serde_json::Error> for BootstrapError {
    fn from(e: serde_json::Error) -> Self {
        Self::MalformedSecret(e.to_string())
    }
}
