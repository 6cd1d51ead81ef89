//! Chatdesk REST API entry point.
//!
//! Binary name: `chatdesk`
//!
//! Parses CLI arguments, loads configuration, wires the conversation store
//! and dialogue relay, then starts the REST API server or runs a token
//! utility command.

mod cli;
mod http;
mod state;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use chatdesk_infra::config::load_global_config;

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity; RUST_LOG wins when set.
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "info",
        1 => "info,chatdesk_core=debug,chatdesk_infra=debug,chatdesk_api=debug",
        _ => "trace",
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    if cli.log_json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(env_filter)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .init();
    }

    match cli.command {
        Commands::Serve {
            host,
            port,
            frontend_origin,
            dialogue_url,
            dialogue_timeout,
        } => {
            let mut config = load_global_config(&cli.config).await;
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            if let Some(origin) = frontend_origin {
                config.frontend_origin = origin;
            }
            if let Some(url) = dialogue_url {
                config.dialogue.base_url = url;
            }
            if let Some(secs) = dialogue_timeout {
                config.dialogue.timeout_secs = secs;
            }

            let addr = format!("{}:{}", config.server.host, config.server.port);
            let state = AppState::init(config);
            let listener = tokio::net::TcpListener::bind(&addr).await?;

            println!(
                "  {} Chatdesk API listening on {}",
                console::style("⚡").bold(),
                console::style(format!("http://{addr}")).cyan()
            );
            println!("  {}", console::style("Press Ctrl+C to stop").dim());

            let router = http::router::build_router(state);

            axum::serve(listener, router)
                .with_graceful_shutdown(shutdown_signal())
                .await?;

            println!("\n  Server stopped.");
        }

        Commands::Token { subject } => {
            cli::token::issue(&subject, cli.json)?;
        }

        Commands::Whoami { token } => {
            cli::token::whoami(&token, cli.json)?;
        }
    }

    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
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
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
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

    tracing::info!("Shutdown signal received");
}
