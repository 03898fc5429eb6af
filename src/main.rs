use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cluster_bootstrap::{config::Config, router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    match &config.secret_id {
        Some(id) => info!("Credentials will be read from secret {}", id),
        None => warn!("SECRET_ID not set, bootstrap requests will fail"),
    }
    if let Some(arn) = &config.cluster_arn {
        info!("Target cluster: {}", arn);
    }

    let addr = format!("{}:{}", config.host, config.port);
    let state = AppState::from_config(config).await;
    let app = router(state);

    info!("cluster bootstrap API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
