use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

pub const SUCCESS_MESSAGE: &str = "Tables created or updated successfully!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BootstrapStatus {
    Success,
    Error,
}

/// Result reported to whoever triggered the bootstrap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BootstrapResponse {
    pub status: BootstrapStatus,
    pub message: String,
}

impl BootstrapResponse {
    pub fn success() -> Self {
        Self {
            status: BootstrapStatus::Success,
            message: SUCCESS_MESSAGE.to_string(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: BootstrapStatus::Error,
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == BootstrapStatus::Success
    }

    pub fn status_code(&self) -> StatusCode {
        match self.status {
            BootstrapStatus::Success => StatusCode::OK,
            BootstrapStatus::Error => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_shape() {
        let response = BootstrapResponse::success();
        assert_eq!(response.status_code(), StatusCode::OK);
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({ "status": "success", "message": "Tables created or updated successfully!" })
        );
    }

    #[test]
    fn test_error_shape() {
        let response = BootstrapResponse::error("boom");
        assert!(!response.is_success());
        assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({ "status": "error", "message": "boom" })
        );
    }
}
