//! Floodwise CLI and REST API entry point.
//!
//! Binary name: `floodwise`
//!
//! Parses CLI arguments, loads configuration and wires the model loader, then
//! dispatches to the appropriate command handler or starts the REST API server.

mod cli;
mod http;
mod sessions;
mod state;

use anyhow::Context;
use clap::Parser;
use clap_complete::generate;

use cli::{Cli, Commands};
use floodwise_observe::tracing_setup::{filter_for_verbosity, init_tracing, shutdown_tracing};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let enable_otel = matches!(cli.command, Commands::Serve { otel: true, .. });
    init_tracing(filter_for_verbosity(cli.verbose, cli.quiet), enable_otel)
        .map_err(|e| anyhow::anyhow!(e))
        .context("Failed to initialize tracing")?;

    // Shell completions don't need app state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "floodwise", &mut std::io::stdout());
        return Ok(());
    }

    let state = AppState::init(cli.config.as_deref(), cli.model.as_deref()).await?;

    let result = run(cli, state).await;
    shutdown_tracing();
    result
}

async fn run(cli: Cli, state: AppState) -> anyhow::Result<()> {
    match cli.command {
        Commands::Serve { host, port, .. } => {
            let host = host.unwrap_or_else(|| state.config.host.clone());
            let port = port.unwrap_or(state.config.port);
            let addr = format!("{host}:{port}");
            let listener = tokio::net::TcpListener::bind(&addr)
                .await
                .with_context(|| format!("Failed to bind {addr}"))?;

            if !cli.quiet {
                println!(
                    "  {} Floodwise API listening on {}",
                    console::style("🌊").bold(),
                    console::style(format!("http://{addr}")).cyan()
                );
                println!(
                    "  {}",
                    console::style(format!("Model: {}", state.model_path.display())).dim()
                );
                println!("  {}", console::style("Press Ctrl+C to stop").dim());
            }
            tracing::info!(%addr, data_dir = %state.data_dir.display(), "server starting");

            let sweeper = state.sessions.clone().spawn_sweeper(sessions::SWEEP_INTERVAL);
            tracing::debug!(ttl_secs = state.sessions.ttl().as_secs(), "session sweeper started");

            let router = http::router::build_router(state);

            axum::serve(listener, router)
                .with_graceful_shutdown(shutdown_signal())
                .await?;
            sweeper.abort();

            if !cli.quiet {
                println!("\n  Server stopped.");
            }
        }

        Commands::Wizard => {
            cli::wizard::run_wizard(&state).await?;
        }

        Commands::Predict { template, input } => {
            cli::predict::predict(&state, template.as_deref(), input.as_deref(), cli.json).await?;
        }

        Commands::Templates => {
            cli::catalog::list_templates(cli.json)?;
        }

        Commands::Schema => {
            cli::catalog::show_schema(cli.json)?;
        }

        Commands::Completions { .. } => unreachable!("handled above"),
    }

    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("shutdown signal received");
}
