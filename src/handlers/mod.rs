//! HTTP request handlers for gemini-relay

use crate::config::Config;
use crate::error::AppResult;
use crate::middleware::request_id_middleware;
use crate::provider::{GeminiProvider, GenerationProvider};
use crate::settings::Resolver;
use axum::{
    Router, middleware,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub mod chat;
pub mod home;

/// Application state shared across all handlers
///
/// Everything is read-only and Arc'd for cheap cloning across Axum handlers.
#[derive(Clone)]
pub struct AppState {
    config: Arc<Config>,
    resolver: Arc<Resolver>,
    provider: Arc<dyn GenerationProvider>,
}

impl AppState {
    /// Production state: layered resolver and the Gemini HTTP client
    pub fn new(config: Arc<Config>) -> AppResult<Self> {
        let resolver = Resolver::layered(&config.settings.override_file);
        let provider = GeminiProvider::new(&config.provider.base_url, config.request_timeout())?;

        Ok(Self::with_parts(config, resolver, Arc::new(provider)))
    }

    /// Assemble state from explicit parts (used by tests and embedders)
    pub fn with_parts(
        config: Arc<Config>,
        resolver: Resolver,
        provider: Arc<dyn GenerationProvider>,
    ) -> Self {
        Self {
            config,
            resolver: Arc::new(resolver),
            provider,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    pub fn provider(&self) -> &dyn GenerationProvider {
        self.provider.as_ref()
    }
}

/// Build the application router
///
/// `/chat` accepts POST only; axum answers other methods with 405.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(home::handler))
        .route("/chat", post(chat::handler))
        .route("/chat/", post(chat::handler))
        .with_state(state)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
}
