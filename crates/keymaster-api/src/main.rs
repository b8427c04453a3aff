//! Keymaster CLI and webhook server entry point.
//!
//! Binary name: `keymaster`
//!
//! Parses CLI arguments, initializes the database and services, then
//! either starts the webhook server or runs a one-shot command.

mod cli;
mod http;
mod state;

use clap::Parser;
use clap_complete::generate;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use keymaster_infra::config::load_server_config;
use keymaster_infra::crypto::vault::VaultCrypto;
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,keymaster=debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    match cli.command {
        // Completions and key generation don't need app state
        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            generate(shell, &mut cmd, "keymaster", &mut std::io::stdout());
        }

        Commands::Genkey => {
            let key = VaultCrypto::generate_key();
            println!();
            println!(
                "  {} Vault master key (set this as FERNET_KEY -- it won't be shown again):",
                console::style("\u{1F511}").bold()
            );
            println!();
            println!("  {}", console::style(&key).yellow().bold());
            println!();
        }

        Commands::Serve { port, host } => {
            let state = AppState::init().await?;

            let mut server = load_server_config(&state.config.data_dir).await;
            if let Some(port) = port {
                server.port = port;
            }
            if let Some(host) = host {
                server.host = host;
            }

            // Register the webhook so Telegram starts delivering updates.
            // A failure here is not fatal: the URL may already be set, or
            // the operator may register it out of band.
            let webhook_url = format!(
                "{}/webhook",
                state.config.webhook_url.trim_end_matches('/')
            );
            let secret = state.config.webhook_secret.as_ref().map(|s| s.expose());
            match state.telegram.set_webhook(&webhook_url, secret).await {
                Ok(()) => tracing::info!(url = %webhook_url, "webhook registered"),
                Err(e) => tracing::warn!(error = %e, "failed to register webhook, continuing"),
            }

            let addr = format!("{}:{}", server.host, server.port);
            let listener = tokio::net::TcpListener::bind(&addr).await?;

            println!(
                "  {} Keymaster listening on {}",
                console::style("\u{26A1}").bold(),
                console::style(format!("http://{addr}")).cyan()
            );
            println!("  {}", console::style("Press Ctrl+C to stop").dim());

            let router = http::router::build_router(state);

            axum::serve(listener, router)
                .with_graceful_shutdown(shutdown_signal())
                .await?;

            println!("\n  Server stopped.");
        }
    }

    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
