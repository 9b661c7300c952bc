//! Chat endpoint handler
//!
//! Handles POST /chat: validates the prompt, resolves the API key and relays
//! the prompt to the generation provider.

use crate::error::{AppError, AppResult};
use crate::handlers::AppState;
use crate::middleware::RequestId;
use crate::provider::GenerationRequest;
use axum::{
    Extension, Json,
    body::Bytes,
    extract::{State, rejection::BytesRejection},
};
use serde::{Deserialize, Serialize};

/// Chat request from client
///
/// `prompt` may be absent; emptiness is checked after trimming in [`handle`].
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    prompt: Option<String>,
}

impl ChatRequest {
    /// Trimmed prompt, or `None` if absent or blank
    pub fn prompt(&self) -> Option<&str> {
        self.prompt
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
    }
}

/// Successful chat response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    response: String,
    success: bool,
}

impl ChatResponse {
    pub fn new(response: String) -> Self {
        Self {
            response,
            success: true,
        }
    }

    pub fn response(&self) -> &str {
        &self.response
    }
}

/// Process a raw request body
///
/// Steps run in a fixed order and the first failure wins: body parsing, prompt
/// presence, API key resolution, then the provider call.
pub async fn handle(state: &AppState, raw_body: &[u8]) -> AppResult<ChatResponse> {
    let request: ChatRequest =
        serde_json::from_slice(raw_body).map_err(|_| AppError::InvalidJson)?;

    let prompt = request.prompt().ok_or(AppError::PromptRequired)?;

    let api_key = state
        .resolver()
        .gemini_api_key()
        .ok_or(AppError::ApiKeyMissing)?;

    let model = state.config().provider.model.as_str();
    let text = state
        .provider()
        .generate(GenerationRequest {
            api_key: &api_key,
            model,
            prompt,
        })
        .await?;

    Ok(ChatResponse::new(text))
}

/// POST /chat handler
///
/// The body is read as raw bytes so that malformed JSON yields this service's
/// own error message regardless of the request's `Content-Type`. Body read
/// failures (e.g. over the size limit) are answered with a JSON error too.
pub async fn handler(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<ChatResponse>, AppError> {
    let body = match body {
        Ok(body) => body,
        Err(rejection) => {
            let err = AppError::from(rejection);
            tracing::warn!(
                request_id = %request_id,
                status = %err.status(),
                error = %err,
                "Could not read chat request body"
            );
            return Err(err);
        }
    };

    tracing::debug!(
        request_id = %request_id,
        body_length = body.len(),
        "Received chat request"
    );

    match handle(&state, &body).await {
        Ok(response) => {
            tracing::info!(
                request_id = %request_id,
                model = %state.config().provider.model,
                response_length = response.response().len(),
                "Generated response"
            );
            Ok(Json(response))
        }
        Err(AppError::Generation(provider_error)) => {
            tracing::error!(
                request_id = %request_id,
                kind = provider_error.kind(),
                error = %provider_error,
                "Generation provider call failed"
            );
            Err(AppError::Generation(provider_error))
        }
        Err(e) if e.status().is_server_error() => {
            tracing::error!(request_id = %request_id, error = %e, "Chat request failed");
            Err(e)
        }
        Err(e) => {
            tracing::warn!(request_id = %request_id, error = %e, "Rejected chat request");
            Err(e)
        }
    }
}
