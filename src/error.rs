use axum::response::{IntoResponse, Response};
use http::StatusCode;
use thiserror::Error;

use crate::services::providers::ProviderError;

/// Application-level failures, each mapped deterministically to one
/// response. Bodies on error paths are plain text; only the success path
/// returns JSON.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid JSON in request body: {0}")]
    InvalidBody(String),

    #[error("API key is not configured.")]
    ApiKeyMissing,

    #[error("Gemini API Error: {body}")]
    UpstreamRejected { status: StatusCode, body: String },

    #[error("Unexpected response format from Gemini API.")]
    UnexpectedFormat,

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Configuration error: {0}")]
    ConfigError(anyhow::Error),
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::ConfigError(anyhow::Error::new(err))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::ServerError(err.to_string())
    }
}

impl From<ProviderError> for AppError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::NotConfigured(_) => AppError::ApiKeyMissing,
            ProviderError::Upstream { status, body } => {
                AppError::UpstreamRejected { status, body }
            }
            ProviderError::UnexpectedFormat => AppError::UnexpectedFormat,
            ProviderError::Network(msg) => AppError::ServerError(msg),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            AppError::ApiKeyMissing => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::UpstreamRejected { status, .. } => *status,
            AppError::UnexpectedFormat => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::ServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::ConfigError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, self.to_string()).into_response()
    }
}
