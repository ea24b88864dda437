use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use guiver_api::auth::JwtIdentityVerifier;
use guiver_api::config::RunMode;
use guiver_api::database::MemoryStore;
use guiver_api::{app, AppConfig, AppState};

#[derive(Debug, Parser)]
#[command(name = "guiver-api", version, about = "Guiver REST API")]
struct Cli {
    /// Listen port (overrides PORT)
    #[arg(long)]
    port: Option<u16>,

    /// Run mode: debug, release or test (overrides GIN_MODE)
    #[arg(long)]
    mode: Option<RunMode>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up PORT, IDENTITY_JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let mut config = AppConfig::from_env().context("invalid configuration")?;
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(mode) = cli.mode {
        config.environment = mode;
    }

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.default_log_filter()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::info!("Starting Guiver API in {:?} mode", config.environment);

    let identity = JwtIdentityVerifier::from_config(&config.identity).context("failed to initialize identity verifier")?;
    let port = config.server.port;
    let state = AppState::new(config, Arc::new(MemoryStore::new()), Arc::new(identity));

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    tracing::info!("Guiver API listening on http://{}", addr);

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutdown signal received"),
        Err(e) => {
            tracing::error!("Failed to listen for shutdown signal: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
