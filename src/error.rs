use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::domain::RateTableError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Internal server error: {0}")]
    Internal(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl From<crate::config::ConfigError> for AppError {
    fn from(err: crate::config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<RateTableError> for AppError {
    fn from(err: RateTableError) -> Self {
        match err {
            RateTableError::UnknownTier(_) | RateTableError::UnknownPaymentMethod { .. } => {
                AppError::BadRequest(err.to_string())
            }
            other => AppError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Config(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
        };

        if status.is_server_error() {
            tracing::error!(%status, error = %error_message, "request failed");
        }

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_keys_map_to_bad_request() {
        let err: AppError = RateTableError::UnknownTier("diamond".to_string()).into();
        assert!(matches!(err, AppError::BadRequest(_)));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_table_defects_map_to_internal() {
        let err: AppError = RateTableError::Empty.into();
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_config_errors_map_to_config_variant() {
        let err: AppError = crate::config::ConfigError::InvalidValue(
            "PORT".to_string(),
            "must be a valid u16".to_string(),
        )
        .into();
        assert_eq!(
            err.to_string(),
            "Configuration error: Invalid value for PORT: must be a valid u16"
        );
        assert!(matches!(err, AppError::Config(_)));
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_not_found_status() {
        let err = AppError::NotFound("route".to_string());
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }
}
