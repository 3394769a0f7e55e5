use std::sync::Arc;

use thiserror::Error;

use crate::models::response::ApiResponse;

/// Client-level error type.
/// `Clone` so one failure can be handed to every caller sharing a coalesced read.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(Arc<reqwest::Error>),

    #[error("HTTP error (status {status}): {body}")]
    Http { status: u16, body: String },

    #[error("Decode error: {0}")]
    Decode(Arc<serde_json::Error>),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Request task failed: {0}")]
    Task(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        ApiError::Network(Arc::new(e))
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Decode(Arc::new(e))
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(e: tokio::task::JoinError) -> Self {
        ApiError::Task(e.to_string())
    }
}

impl ApiError {
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Network(_) => "NETWORK_ERROR",
            ApiError::Http { .. } => "HTTP_ERROR",
            ApiError::Decode(_) => "DECODE_ERROR",
            ApiError::Validation(_) => "VALIDATION_ERROR",
            ApiError::Task(_) => "TASK_ERROR",
        }
    }

    /// Renders the error as a failed envelope for display layers.
    pub fn into_response<T>(self) -> ApiResponse<T> {
        let message = match &self {
            ApiError::Network(e) => {
                tracing::error!("Network error: {e}");
                "Could not reach the server".to_string()
            }
            ApiError::Http { status, body } => {
                tracing::error!("HTTP error {status}: {body}");
                format!("Server responded with status {status}")
            }
            ApiError::Decode(e) => {
                tracing::error!("Decode error: {e}");
                "The server returned an unexpected response".to_string()
            }
            ApiError::Validation(msg) => msg.clone(),
            ApiError::Task(e) => {
                tracing::error!("Request task failed: {e}");
                "The request was interrupted".to_string()
            }
        };

        ApiResponse {
            success: false,
            data: None,
            message: Some(message),
            error: Some(format!("{}: {}", self.code(), self)),
        }
    }
}
