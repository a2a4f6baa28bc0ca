mod main_runtime;

use clap::Parser;
use heartbeat::bootstrap::{build_app_state, build_diagnosis};
use heartbeat::cli::{self, Cli, Commands};
use heartbeat::config::AppConfig;
use heartbeat::error::Result;
use main_runtime::{init_logging, init_logging_simple, shutdown_signal};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load_from(&cli.config)?;
    if let Some(model) = &cli.model {
        config.model.path = model.clone();
    }

    match &cli.command {
        Some(Commands::Classify { input, json }) => {
            init_logging_simple();
            let service = build_diagnosis(&config.model)?;
            let input = input.clone();
            let json = *json;
            let diagnosed =
                tokio::task::spawn_blocking(move || cli::classify(&service, &input, json))
                    .await
                    .map_err(|e| heartbeat::HeartbeatError::Internal(e.to_string()))??;
            if !diagnosed {
                std::process::exit(2);
            }
        }
        Some(Commands::Inspect) => {
            init_logging_simple();
            let service = build_diagnosis(&config.model)?;
            cli::inspect(&service, &config.model.path);
        }
        Some(Commands::Serve { host, port }) => {
            if let Some(host) = host {
                config.server.host = host.clone();
            }
            if let Some(port) = port {
                config.server.port = *port;
            }
            run_server(config).await?;
        }
        None => run_server(config).await?,
    }

    Ok(())
}

/// Load the model (fail fast), then serve until Ctrl+C / SIGTERM.
async fn run_server(config: AppConfig) -> Result<()> {
    let _log_guard = init_logging(&config.logging);

    info!(model = %config.model.path.display(), "loading classifier");
    let state = build_app_state(&config)?;

    heartbeat::api::start_server(
        state,
        &config.server.host,
        config.server.port,
        shutdown_signal(),
    )
    .await?;

    info!("Shutdown complete");
    Ok(())
}
