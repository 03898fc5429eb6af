use std::env;

use sqlx::postgres::PgSslMode;

#[derive(Debug, Clone)]
pub struct Config {
    /// Secret store identifier naming the cluster credential bundle.
    /// Left optional so a missing value is reported per invocation.
    pub secret_id: Option<String>,
    pub cluster_arn: Option<String>,
    pub aws_region: Option<String>,
    pub secrets_endpoint_url: Option<String>,
    pub db_ssl_mode: PgSslMode,
    pub host: String,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            secret_id: optional("SECRET_ID"),
            cluster_arn: optional("CLUSTER_ARN"),
            aws_region: optional("AWS_REGION"),
            secrets_endpoint_url: optional("SECRETS_ENDPOINT_URL"),
            db_ssl_mode: parse_ssl_mode(
                &env::var("DB_SSL_MODE").unwrap_or_else(|_| "prefer".into()),
            )?,
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".into())
                .parse()?,
        })
    }
}

fn optional(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.trim().is_empty())
}

pub fn parse_ssl_mode(raw: &str) -> anyhow::Result<PgSslMode> {
    raw.trim()
        .parse::<PgSslMode>()
        .map_err(|_| anyhow::anyhow!("Invalid DB_SSL_MODE: {}", raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ssl_mode() {
        assert!(matches!(parse_ssl_mode("require").unwrap(), PgSslMode::Require));
        assert!(matches!(parse_ssl_mode(" prefer ").unwrap(), PgSslMode::Prefer));
        assert!(matches!(
            parse_ssl_mode("verify-full").unwrap(),
            PgSslMode::VerifyFull
        ));
    }

    #[test]
    fn test_parse_ssl_mode_rejects_unknown() {
        assert!(parse_ssl_mode("sometimes").is_err());
    }
}
