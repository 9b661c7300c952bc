//! Error types for gemini-relay
//!
//! All errors implement `IntoResponse` for Axum handlers.

use crate::provider::ProviderError;
use axum::{
    Json,
    extract::rejection::BytesRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Main error type for the application
#[derive(Error, Debug)]
pub enum AppError {
    /// Request body was not a JSON object of the expected shape
    #[error("Invalid JSON in request")]
    InvalidJson,

    /// Request body could not be read (size limit, aborted upload)
    #[error("{message}")]
    RequestBody { status: StatusCode, message: String },

    /// Prompt was missing, empty, or whitespace-only
    #[error("Prompt is required")]
    PromptRequired,

    /// No Gemini API key in the override file or the environment.
    ///
    /// Reported as a server error: it is a deployment fault, not a caller fault.
    #[error("Gemini API key not configured")]
    ApiKeyMissing,

    #[error("Error generating response: {0}")]
    Generation(#[from] ProviderError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to read configuration file {path}: {source}")]
    ConfigFileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse configuration file {path}: {source}")]
    ConfigParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// HTTP status this error maps to
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidJson | Self::PromptRequired => StatusCode::BAD_REQUEST,
            Self::RequestBody { status, .. } => *status,
            Self::ApiKeyMissing
            | Self::Generation(_)
            | Self::Config(_)
            | Self::ConfigFileRead { .. }
            | Self::ConfigParseFailed { .. }
            | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<BytesRejection> for AppError {
    fn from(rejection: BytesRejection) -> Self {
        Self::RequestBody {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(serde_json::json!({
            "error": self.to_string(),
        }));

        (self.status(), body).into_response()
    }
}

/// Convenience type alias for Results
pub type AppResult<T> = Result<T, AppError>;
