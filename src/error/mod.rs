use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::matrix::DeliveryError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Method not allowed: {0}")]
    MethodNotAllowed(String),

    #[error("Delivery error: {0}")]
    Delivery(#[from] DeliveryError),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Serialize)]
struct ErrorBody {
    code: String,
    message: String,
}

/// Check if running in production mode (based on RUN_MODE env var)
fn is_production() -> bool {
    std::env::var("RUN_MODE")
        .map(|m| m == "production" || m == "prod")
        .unwrap_or(false)
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::InvalidJson(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            AppError::Config(_) | AppError::Delivery(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            AppError::Config(_) => "CONFIG_ERROR",
            AppError::Unauthorized(_) => "UNAUTHORIZED",
            AppError::InvalidJson(_) => "INVALID_JSON",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::MethodNotAllowed(_) => "METHOD_NOT_ALLOWED",
            AppError::Delivery(_) => "DELIVERY_ERROR",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.code();
        let log_message = self.to_string();

        // Server-side failures may carry upstream details
        let client_message = match &self {
            AppError::Config(_) if is_production() => "Configuration error".to_string(),
            AppError::Delivery(_) if is_production() => "Delivery failed".to_string(),
            _ => log_message.clone(),
        };

        // Always log the detailed error server-side
        if status.is_server_error() {
            tracing::error!(code = %code, status = %status.as_u16(), message = %log_message, "Request failed");
        } else {
            tracing::warn!(code = %code, status = %status.as_u16(), message = %log_message, "Request rejected");
        }

        let body = ErrorResponse {
            error: ErrorBody {
                code: code.to_string(),
                message: client_message,
            },
        };

        (status, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::Unauthorized("bad signature".into()).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::NotFound("/nope".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::MethodNotAllowed("GET".into()).status_code(),
            StatusCode::METHOD_NOT_ALLOWED
        );
        assert_eq!(
            AppError::Delivery(DeliveryError::InvalidUrl("x".into())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_invalid_json_from_serde() {
        let err = serde_json::from_str::<serde_json::Value>("{nope").unwrap_err();
        let app_err = AppError::from(err);
        assert_eq!(app_err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(app_err.code(), "INVALID_JSON");
    }

    #[test]
    fn test_config_error_from_config_crate() {
        let err = AppError::from(config::ConfigError::NotFound("matrix.room_id".into()));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.code(), "CONFIG_ERROR");
    }

    #[test]
    fn test_into_response_status() {
        let response = AppError::Unauthorized("bad signature".into()).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
