//! balanceadord - Balanceador daemon
//!
//! Serves one unified hunters API over several independent hunters
//! services (by default a mongo-backed and a postgres-backed one).
//!
//! Usage:
//!   balanceadord [OPTIONS] [config.toml]
//!
//! Environment:
//!   MONGO_SERVICE_URL  URL of the mongo backend (default http://localhost:4001)
//!   PG_SERVICE_URL     URL of the postgres backend (default http://localhost:4002)
//!   PORT               Listening port (default 5000)
//!   RUST_LOG           Log filter

mod config;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use balanceador_api::{create_router, AppState};
use balanceador_client::{CazadoresClient, HunterBackend};
use balanceador_gateway::Gateway;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;

/// Parsed command-line arguments
struct Args {
    /// Config file (TOML)
    config_path: Option<PathBuf>,
}

fn parse_args() -> Args {
    let mut result = Args { config_path: None };

    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            arg if !arg.starts_with('-') => {
                // Positional argument = config file
                result.config_path = Some(PathBuf::from(arg));
            }
            _ => {
                tracing::warn!("Unknown argument: {}", arg);
            }
        }
    }

    result
}

fn print_help() {
    eprintln!(
        r#"balanceadord - Balanceador daemon

Usage: balanceadord [OPTIONS] [config.toml]

Options:
  -h, --help  Print this help message

Environment:
  MONGO_SERVICE_URL  URL of the mongo backend (default http://localhost:4001)
  PG_SERVICE_URL     URL of the postgres backend (default http://localhost:4002)
  PORT               Listening port (default 5000)

Examples:
  # Run against local services
  balanceadord

  # Run with config file
  balanceadord balanceador.toml

  # Point at remote services
  MONGO_SERVICE_URL=http://mongo:4001 PG_SERVICE_URL=http://pg:4002 balanceadord
"#
    );
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "balanceadord=info,balanceador_api=info,balanceador_gateway=info,balanceador_client=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting balanceadord");

    let args = parse_args();
    if let Some(ref path) = args.config_path {
        tracing::info!("Loading config from: {}", path.display());
    }
    let config = Config::load(args.config_path.as_deref())?;

    let gateway = build_gateway(&config)?;
    let app = create_router(AppState::new(gateway), &config.server.prefix);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!(prefix = %config.server.prefix, "Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shut down");
    Ok(())
}

/// Build one HTTP client per configured backend, in configured order
fn build_gateway(config: &Config) -> anyhow::Result<Gateway> {
    let mut backends: Vec<Arc<dyn HunterBackend>> = Vec::with_capacity(config.backends.len());

    for backend in &config.backends {
        tracing::info!(
            backend = %backend.name,
            url = %backend.url,
            timeout_ms = backend.timeout_ms,
            "Creating backend client"
        );

        let client = CazadoresClient::with_config(
            &backend.name,
            &backend.url,
            Duration::from_millis(backend.timeout_ms),
            Duration::from_millis(backend.connect_timeout_ms),
        )
        .map_err(|e| anyhow::anyhow!("Failed to create backend '{}': {}", backend.name, e))?;

        backends.push(Arc::new(client));
    }

    let mut gateway = Gateway::new(backends)?;
    if let Some(ms) = config.server.call_timeout_ms {
        gateway = gateway.with_call_timeout(Duration::from_millis(ms));
    }

    Ok(gateway)
}

/// Resolve on Ctrl-C or SIGTERM. In-flight backend calls are abandoned.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
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
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
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
