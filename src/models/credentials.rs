use std::fmt;

use serde::{Deserialize, Deserializer};
use sqlx::postgres::{PgConnectOptions, PgSslMode};

use crate::error::BootstrapError;

/// Connection bundle stored in the cluster secret.
///
/// The generated cluster secret also carries keys such as `engine` and
/// `dbClusterIdentifier`; those are ignored.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct DbCredentials {
    pub host: String,
    #[serde(deserialize_with = "port_number_or_string")]
    pub port: u16,
    pub username: String,
    pub password: String,
    pub dbname: String,
}

impl DbCredentials {
    /// Parse a secret payload. Any shape mismatch is a `MalformedSecret`.
    pub fn parse(raw: &str) -> Result<Self, BootstrapError> {
        let credentials: DbCredentials = serde_json::from_str(raw)?;
        if credentials.host.trim().is_empty() {
            return Err(BootstrapError::MalformedSecret("host is empty".into()));
        }
        if credentials.dbname.trim().is_empty() {
            return Err(BootstrapError::MalformedSecret("dbname is empty".into()));
        }
        Ok(credentials)
    }

    pub fn connect_options(&self, ssl_mode: PgSslMode) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.username)
            .password(&self.password)
            .database(&self.dbname)
            .ssl_mode(ssl_mode)
    }
}

// Never print the password.
impl fmt::Debug for DbCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbCredentials")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"***")
            .field("dbname", &self.dbname)
            .finish()
    }
}

fn port_number_or_string<'de, D>(deserializer: D) -> Result<u16, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Port {
        Number(u16),
        Text(String),
    }

    match Port::deserialize(deserializer)? {
        Port::Number(port) => Ok(port),
        Port::Text(text) => text
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid port: {text:?}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_secret() {
        let creds = DbCredentials::parse(
            r#"{"host":"db.example","port":5432,"username":"admin","password":"x","dbname":"app"}"#,
        )
        .unwrap();
        assert_eq!(creds.host, "db.example");
        assert_eq!(creds.port, 5432);
        assert_eq!(creds.username, "admin");
        assert_eq!(creds.password, "x");
        assert_eq!(creds.dbname, "app");
    }

    #[test]
    fn test_parse_generated_cluster_secret() {
        let creds = DbCredentials::parse(
            r#"{
                "dbClusterIdentifier": "database-m-aurora-serverless-cluster",
                "password": "s3cr3t",
                "dbname": "servercommandrds",
                "engine": "postgres",
                "port": "5432",
                "host": "cluster.rds.amazonaws.com",
                "username": "dbadminuser"
            }"#,
        )
        .unwrap();
        assert_eq!(creds.port, 5432);
        assert_eq!(creds.username, "dbadminuser");
    }

    #[test]
    fn test_parse_rejects_bad_shapes() {
        let cases = [
            "not json",
            r#"{"host":"db","port":5432,"username":"u","password":"p"}"#,
            r#"{"host":"db","port":"fifty","username":"u","password":"p","dbname":"d"}"#,
            r#"{"host":"db","port":70000,"username":"u","password":"p","dbname":"d"}"#,
            r#"{"host":" ","port":5432,"username":"u","password":"p","dbname":"d"}"#,
        ];
        for raw in cases {
            let err = DbCredentials::parse(raw).unwrap_err();
            assert!(
                matches!(err, BootstrapError::MalformedSecret(_)),
                "{raw} -> {err:?}"
            );
        }
    }

    #[test]
    fn test_debug_redacts_password() {
        let creds = DbCredentials::parse(
            r#"{"host":"db","port":5432,"username":"u","password":"hunter2","dbname":"d"}"#,
        )
        .unwrap();
        let printed = format!("{creds:?}");
        assert!(!printed.contains("hunter2"));
        assert!(printed.contains("***"));
    }
}
