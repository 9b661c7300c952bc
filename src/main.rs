//! gemini-relay HTTP server

use clap::Parser;
use gemini_relay::{
    cli::{Cli, Command, generate_config_template},
    config::Config,
    handlers::{self, AppState},
    settings::Resolver,
    telemetry,
};
use std::net::SocketAddr;
use std::process::ExitCode;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Some(Command::Config { output: Some(path) }) => {
            std::fs::write(&path, generate_config_template())?;
            println!("Wrote configuration template to {}", path);
            return Ok(ExitCode::SUCCESS);
        }
        Some(Command::Config { output: None }) => {
            print!("{}", generate_config_template());
            return Ok(ExitCode::SUCCESS);
        }
        Some(Command::Check) => {
            let config = Config::load_or_default(&cli.config)?;
            let missing = Resolver::layered(&config.settings.override_file).validate_required();
            if missing.is_empty() {
                println!("All required configuration is present");
                return Ok(ExitCode::SUCCESS);
            }
            eprintln!("Missing required configuration: {}", missing.join(", "));
            return Ok(ExitCode::FAILURE);
        }
        None => {}
    }

    let config = Config::load_or_default(&cli.config)?;
    telemetry::init(&config.observability.log_level);

    let config = Arc::new(config);
    let state = AppState::new(config.clone())?;

    let missing = state.resolver().validate_required();
    if !missing.is_empty() {
        tracing::warn!(
            missing = ?missing,
            override_file = %config.settings.override_file,
            "Required configuration missing; /chat will fail until it is provided"
        );
    }

    let addr = SocketAddr::from((
        config
            .server
            .host
            .parse::<std::net::IpAddr>()
            .unwrap_or_else(|_| std::net::IpAddr::from([127, 0, 0, 1])),
        config.server.port,
    ));

    tracing::info!(
        model = %config.provider.model,
        "Starting gemini-relay on {}",
        addr
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, handlers::app(state)).await?;

    Ok(ExitCode::SUCCESS)
}
