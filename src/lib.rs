// Library exports for binary tools and tests
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use config::Config;
use db::PgConnector;
use services::{bootstrap::BootstrapService, secrets::SecretsManagerStore};

pub type Bootstrapper = BootstrapService<SecretsManagerStore, PgConnector>;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub bootstrap: Arc<Bootstrapper>,
}

impl AppState {
    pub async fn from_config(config: Config) -> Self {
        let secrets = SecretsManagerStore::from_config(&config).await;
        let connector = PgConnector::new(config.db_ssl_mode);
        let bootstrap = BootstrapService::new(secrets, connector, config.secret_id.clone());
        Self {
            config: Arc::new(config),
            bootstrap: Arc::new(bootstrap),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/bootstrap", post(routes::bootstrap::run_bootstrap))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
