//! Run the schema bootstrap once and print the result as JSON.
//!
//! Usage: bootstrap [--secret-id ID] [--check]
//!   --secret-id ID : Secret to read credentials from (defaults to SECRET_ID)
//!   --check        : After bootstrapping, verify every table exists

use clap::Parser;
use sqlx::Connection;

use cluster_bootstrap::{
    config::Config,
    db::{self, Connector, PgConnector},
    services::{
        bootstrap::BootstrapService,
        secrets::{resolve_credentials, SecretsManagerStore},
    },
};

#[derive(Parser)]
#[command(name = "bootstrap", about = "Create the application tables on the cluster")]
struct Args {
    /// Secret identifier (overrides SECRET_ID)
    #[arg(long)]
    secret_id: Option<String>,

    /// Verify the tables are present after bootstrapping
    #[arg(long)]
    check: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let mut config = Config::from_env()?;
    if args.secret_id.is_some() {
        config.secret_id = args.secret_id;
    }

    let secrets = SecretsManagerStore::from_config(&config).await;
    let service = BootstrapService::new(
        secrets,
        PgConnector::new(config.db_ssl_mode),
        config.secret_id.clone(),
    );

    let response = service.invoke().await;
    println!("{}", serde_json::to_string(&response)?);
    if !response.is_success() {
        std::process::exit(1);
    }

    if args.check {
        let credentials = resolve_credentials(service.secrets(), service.secret_id()).await?;
        let mut conn = service.connector().connect(&credentials).await?;
        let missing = db::missing_tables(&mut conn).await;
        conn.close().await?;

        let missing = missing?;
        if !missing.is_empty() {
            anyhow::bail!("Tables missing after bootstrap: {}", missing.join(", "));
        }
        tracing::info!("All {} tables present", db::schema::TABLES.len());
    }

    Ok(())
}
