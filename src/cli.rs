//! Command-line interface for gemini-relay

use clap::{Parser, Subcommand};

/// Minimal web backend relaying prompts to the Gemini API
#[derive(Parser)]
#[command(name = "gemini-relay")]
#[command(version)]
#[command(about = "Minimal web backend relaying prompts to the Gemini API")]
pub struct Cli {
    /// Path to configuration file (defaults are used if it does not exist)
    #[arg(short, long, default_value = "config.toml", global = true)]
    pub config: String,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Generate a template configuration file
    Config {
        /// Output file path (prints to stdout if not specified)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Report required parameters that are not set; exits non-zero if any are missing
    Check,
}

/// Template configuration content
pub fn generate_config_template() -> &'static str {
    r#"# gemini-relay configuration
#
# Every setting below is optional; the values shown are the defaults.
# The Gemini API key is NOT read from this file. Set GEMINI_API_KEY in the
# override file named under [settings] or in the process environment.

[server]
# Address to bind to
host = "127.0.0.1"
port = 8000

# Timeout in seconds for each call to the Gemini API (1-300)
request_timeout_seconds = 60

[provider]
# Root of the Gemini REST API
base_url = "https://generativelanguage.googleapis.com/v1beta"

# Model used for every prompt
model = "gemini-2.0-flash-exp"

[settings]
# Dotenv-format file consulted before environment variables
override_file = ".env.local"

[observability]
# Log level: "trace", "debug", "info", "warn", "error" (RUST_LOG overrides)
log_level = "info"
"#
}
