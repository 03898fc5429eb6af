pub mod schema;

use async_trait::async_trait;
use sqlx::postgres::{PgConnection, PgSslMode};
use sqlx::{Connection, Executor};

use crate::error::BootstrapError;
use crate::models::credentials::DbCredentials;
use schema::TABLES;

/// A single open database connection able to run DDL.
#[async_trait]
pub trait SchemaConnection: Send {
    async fn execute_ddl(&mut self, sql: &str) -> Result<(), sqlx::Error>;

    /// Gracefully close the connection.
    async fn close(self) -> Result<(), sqlx::Error>;
}

/// Opens connections from a resolved credential bundle.
#[async_trait]
pub trait Connector: Send + Sync {
    type Connection: SchemaConnection;

    async fn connect(&self, credentials: &DbCredentials) -> Result<Self::Connection, sqlx::Error>;
}

#[async_trait]
impl SchemaConnection for PgConnection {
    async fn execute_ddl(&mut self, sql: &str) -> Result<(), sqlx::Error> {
        Executor::execute(self, sqlx::raw_sql(sql)).await?;
        Ok(())
    }

    async fn close(self) -> Result<(), sqlx::Error> {
        Connection::close(self).await
    }
}

/// Plain PostgreSQL connector. No pooling: one connection per invocation.
#[derive(Debug, Clone)]
pub struct PgConnector {
    ssl_mode: PgSslMode,
}

impl PgConnector {
    pub fn new(ssl_mode: PgSslMode) -> Self {
        Self { ssl_mode }
    }
}

#[async_trait]
impl Connector for PgConnector {
    type Connection = PgConnection;

    async fn connect(&self, credentials: &DbCredentials) -> Result<PgConnection, sqlx::Error> {
        PgConnection::connect_with(&credentials.connect_options(self.ssl_mode)).await
    }
}

/// Owns a connection for the length of one invocation.
///
/// [`ScopedConnection::release`] closes it gracefully. If the guard is dropped
/// without being released (panic, cancelled future) the connection is dropped
/// with it, which tears down the socket.
pub struct ScopedConnection<C: SchemaConnection> {
    conn: C,
}

impl<C: SchemaConnection> ScopedConnection<C> {
    pub async fn open<K>(connector: &K, credentials: &DbCredentials) -> Result<Self, BootstrapError>
    where
        K: Connector<Connection = C>,
    {
        let conn = connector
            .connect(credentials)
            .await
            .map_err(BootstrapError::ConnectionFailed)?;
        tracing::info!(host = %credentials.host, db = %credentials.dbname, "Connected to database");
        Ok(Self { conn })
    }

    pub fn get_mut(&mut self) -> &mut C {
        &mut self.conn
    }

    pub async fn release(self) {
        match self.conn.close().await {
            Ok(()) => tracing::info!("Database connection closed"),
            Err(e) => tracing::warn!("Database connection closed uncleanly: {}", e),
        }
    }
}

/// Apply every schema statement in order, stopping at the first failure.
/// Returns the tables that were ensured.
pub async fn apply_schema<C: SchemaConnection>(
    conn: &mut C,
) -> Result<Vec<&'static str>, BootstrapError> {
    let mut applied = Vec::with_capacity(TABLES.len());
    for (step, table) in TABLES.iter().enumerate() {
        tracing::debug!(step, table = table.name, "Applying table");
        conn.execute_ddl(table.ddl)
            .await
            .map_err(|source| BootstrapError::SchemaApplyFailed {
                table: table.name,
                source,
            })?;
        applied.push(table.name);
    }
    Ok(applied)
}

/// Schema tables not present in the connection's current schema.
pub async fn missing_tables(conn: &mut PgConnection) -> Result<Vec<&'static str>, sqlx::Error> {
    let existing: Vec<String> = sqlx::query_scalar(
        "SELECT table_name::TEXT FROM information_schema.tables
         WHERE table_schema = current_schema()",
    )
    .fetch_all(&mut *conn)
    .await?;
    Ok(schema::missing_from(&existing))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Set DATABASE_URL to run the tests that need a live PostgreSQL.
    fn database_url() -> Option<String> {
        std::env::var("DATABASE_URL").ok().filter(|s| !s.is_empty())
    }

    #[tokio::test]
    async fn test_apply_schema_on_postgres() {
        let Some(url) = database_url() else {
            eprintln!("DATABASE_URL not set, skipping");
            return;
        };
        let conn = PgConnection::connect(&url).await.unwrap();
        let mut scoped = ScopedConnection { conn };

        let first = apply_schema(scoped.get_mut()).await.unwrap();
        let second = apply_schema(scoped.get_mut()).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), TABLES.len());

        let missing = missing_tables(scoped.get_mut()).await.unwrap();
        assert!(missing.is_empty(), "missing tables: {missing:?}");

        let columns: Vec<(String, i64)> = sqlx::query_as(
            "SELECT table_name::TEXT, COUNT(*) FROM information_schema.columns
             WHERE table_schema = current_schema()
               AND table_name IN ('company', 'users', 'client', 'tax_code', 'site')
             GROUP BY table_name ORDER BY table_name",
        )
        .fetch_all(&mut *scoped.get_mut())
        .await
        .unwrap();
        assert_eq!(
            columns,
            vec![
                ("client".to_string(), 8),
                ("company".to_string(), 9),
                ("site".to_string(), 15),
                ("tax_code".to_string(), 6),
                ("users".to_string(), 8),
            ]
        );

        scoped.release().await;
    }

    #[tokio::test]
    async fn test_pg_connector_unreachable() {
        let credentials = DbCredentials::parse(
            r#"{"host":"127.0.0.1","port":1,"username":"admin","password":"x","dbname":"app"}"#,
        )
        .unwrap();
        let connector = PgConnector::new(PgSslMode::Disable);

        let err = ScopedConnection::open(&connector, &credentials)
            .await
            .err()
            .unwrap();
        assert_eq!(err.kind(), "connection_failed");
    }
}
