//! Pingbot - Slack Events API receiver.
//!
//! Verifies Slack event requests, answers the URL verification handshake
//! and replies to app mentions. Events are handled inside the request, so
//! a slow Slack API makes responses slow.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::{net::TcpListener, signal};
use tracing::{error, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use pingbot::{router, AppState, Args, Config, EventHandler, PingBot, SlackClient};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize structured JSON logging
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().json().flatten_event(true))
        .init();

    info!("pingbot_starting");

    let args = Args::parse();
    let config = Config::from_env(&args).context("Failed to load configuration")?;
    info!(
        listen_addr = %config.listen_addr,
        slack_api_url = %config.slack_api_url,
        request_timeout_ms = config.request_timeout_ms,
        "config_loaded"
    );

    let slack = SlackClient::from_config(&config).context("Failed to create Slack client")?;
    let handler = EventHandler::new(config.signing_secret.clone(), Arc::new(PingBot::new(slack)));
    let app = router(AppState::new(handler));

    let listener = TcpListener::bind(config.listen_addr)
        .await
        .context("Failed to bind to address")?;

    info!(address = %config.listen_addr, "web_server_listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("web_server_shutdown_complete");

    Ok(())
}

/// Create a future that completes when a shutdown signal is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "sigint_handler_install_failed");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!(error = %e, "sigterm_handler_install_failed");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received SIGINT"),
        _ = terminate => info!("Received SIGTERM"),
    }

    info!("web_server_shutting_down");
}
