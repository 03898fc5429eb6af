use axum::{extract::State, http::StatusCode, Json};

use crate::{models::bootstrap::BootstrapResponse, AppState};

/// Trigger one bootstrap run. Takes no body; the secret comes from config.
pub async fn run_bootstrap(State(state): State<AppState>) -> (StatusCode, Json<BootstrapResponse>) {
    let response = state.bootstrap.invoke().await;
    (response.status_code(), Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::postgres::PgSslMode;

    use crate::config::Config;
    use crate::models::bootstrap::BootstrapStatus;

    #[tokio::test]
    async fn test_failed_run_is_server_error() {
        let config = Config {
            secret_id: None,
            cluster_arn: None,
            aws_region: Some("us-east-1".into()),
            secrets_endpoint_url: None,
            db_ssl_mode: PgSslMode::Prefer,
            host: "127.0.0.1".into(),
            port: 0,
        };
        let state = AppState::from_config(config).await;

        let (status, Json(body)) = run_bootstrap(State(state)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.status, BootstrapStatus::Error);
        assert!(body.message.contains("SECRET_ID is not configured"));
    }
}
