use std::sync::Arc;

use anyhow::Result;
use tiny_webhook::config::LogFormat;
use tiny_webhook::logging::{self, EventLog};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use tiny_webhook_server::cli::CliArgs;
use tiny_webhook_server::config::ServerConfig;
use tiny_webhook_server::{AppState, create_router};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli_args = CliArgs::parse();
    let server_config = ServerConfig::from_cli_and_env(cli_args)?;
    let directive = server_config.log_level.clone();

    // The configuration decides the console format and filter, so a failed
    // load falls back to the defaults to report the problem
    let webhook_config = match server_config.load_webhook_config() {
        Ok(config) => config,
        Err(e) => {
            logging::init(LogFormat::default(), directive.as_deref())?;
            fail(&EventLog::default(), e);
        }
    };
    let directive =
        directive.or_else(|| logging::console_directive(&webhook_config.log.levels));
    logging::init(webhook_config.log.format, directive.as_deref())?;

    info!("Starting tiny-webhook v{}", tiny_webhook::VERSION);

    if server_config.check {
        println!(
            "Configuration is valid: {} hook(s), listening on {}",
            webhook_config.hooks.len(),
            server_config.bind_address(&webhook_config)
        );
        return Ok(());
    }

    let addr = server_config.bind_address(&webhook_config);
    let port = webhook_config.http.port;
    let app_state = match AppState::from_webhook_config(webhook_config, server_config) {
        Ok(state) => Arc::new(state),
        Err(e) => fail(&EventLog::default(), e),
    };
    let event_log = app_state.event_log.clone();

    // Create the router
    let app = create_router(app_state).layer(TraceLayer::new_for_http());

    event_log.info(format!("Starting tiny-webhook on port {}", port));
    let listener = match TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => fail(&event_log, format!("Cannot listen on {}: {}", addr, e)),
    };
    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Record a critical failure and terminate the process.
fn fail(log: &EventLog, error: impl std::fmt::Display) -> ! {
    log.critical(error.to_string());
    std::process::exit(1);
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
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
                tracing::error!("Failed to listen for SIGTERM: {}", e);
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

    info!("Shutdown signal received");
}
