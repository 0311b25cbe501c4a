//! MCP Server Entry Point
//!
//! Loads configuration, initializes logging, and serves MCP requests on the
//! configured transport until input closes or the process is interrupted.

use anyhow::Result;
use tracing::{Level, error, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use perplexity_mcp_server::core::{Config, McpServer, TransportService, run_until_shutdown};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration from environment
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            init_logging("info");
            error!("{}", e);
            return Err(e.into());
        }
    };

    init_logging(&config.logging.level);

    info!("Starting {} v{}", config.server.name, config.server.version);
    info!(
        "Perplexity model '{}' at {}",
        config.perplexity.model, config.perplexity.endpoint
    );

    let server = McpServer::new(config.clone())?;
    let transport = TransportService::new(config.transport);

    match run_until_shutdown(transport.run(server), shutdown_signal()).await {
        Some(result) => {
            result?;
            info!("Transport finished, server shutting down");
            Ok(())
        }
        None => {
            info!("Interrupt received, server shutting down");
            // A pending stdin read cannot be cancelled and would keep the
            // runtime from dropping, so exit without unwinding it.
            std::process::exit(0);
        }
    }
}

/// Resolve on Ctrl-C. If the handler cannot be installed, never resolve.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}

/// Initialize the logging subsystem.
///
/// Logs go to stderr so stdout stays reserved for protocol messages.
fn init_logging(level: &str) {
    let level = match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .init();
}
