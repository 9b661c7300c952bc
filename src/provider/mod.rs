//! Text generation providers
//!
//! The chat handler only depends on [`GenerationProvider`]; the production
//! implementation is [`gemini::GeminiProvider`].

use async_trait::async_trait;
use thiserror::Error;

pub mod gemini;

pub use gemini::GeminiProvider;

/// A single generation call
#[derive(Debug, Clone, Copy)]
pub struct GenerationRequest<'a> {
    /// Credential resolved for this request
    pub api_key: &'a str,
    /// Model identifier, e.g. `gemini-2.0-flash-exp`
    pub model: &'a str,
    /// Trimmed, non-empty prompt
    pub prompt: &'a str,
}

/// Why a generation call failed
///
/// Callers outside this module only ever show the `Display` text, prefixed by
/// "Error generating response: ". The variants let logs tell the cases apart.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// Could not reach the provider (connect failure, TLS, timeout)
    #[error("{0}")]
    Unreachable(String),

    /// Provider answered with a non-success status
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// Provider answered successfully but the body was not usable
    #[error("Unexpected response from provider: {0}")]
    UnexpectedResponse(String),
}

impl ProviderError {
    /// Stable label for log fields
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Unreachable(_) => "unreachable",
            Self::Rejected { .. } => "rejected",
            Self::UnexpectedResponse(_) => "unexpected_response",
        }
    }
}

/// External text-generation service
#[async_trait]
pub trait GenerationProvider: Send + Sync {
    async fn generate(&self, request: GenerationRequest<'_>) -> Result<String, ProviderError>;
}
