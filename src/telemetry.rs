//! Structured logging setup with tracing and tracing-subscriber.

use std::sync::Once;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

static INIT: Once = Once::new();

/// Default filter directive for a given level
pub fn default_filter(level: &str) -> String {
    format!("gemini_relay={},tower_http=debug", level)
}

/// Initialize the global subscriber
///
/// `RUST_LOG` wins over the configured level. Only the first call in a
/// process has any effect.
///
/// ```no_run
/// gemini_relay::telemetry::init("info");
/// tracing::info!("Application started");
/// ```
pub fn init(default_level: &str) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_filter(default_level)));

        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    });
}
