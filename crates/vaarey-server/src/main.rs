use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use vaarey_core::{AppError, Config};
use vaarey_server::{app, AppState};

#[derive(Debug, Parser)]
#[command(name = "vaarey-server", about = "Rainfall statistics API for Maldivian cities")]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(long, env = "VAAREY_CONFIG")]
    config: Option<PathBuf>,

    /// Override the configured listen address
    #[arg(long)]
    listen: Option<SocketAddr>,
}

#[tokio::main]
async fn main() -> Result<()> {
    vaarey_core::init()?;
    let cli = Cli::parse();

    let (config, _validation) =
        Config::load_validated(cli.config.as_deref()).map_err(AppError::Config)?;

    let listen = match cli.listen {
        Some(addr) => addr,
        None => config
            .server
            .listen
            .parse()
            .context("Invalid server.listen address")?,
    };

    let state = AppState::from_config(config)?;
    let router = app(state);

    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .with_context(|| format!("Failed to bind {listen}"))?;
    tracing::info!("Vaarey server listening on {}", listen);

    axum::serve(listener, router).await.context("Server error")?;
    Ok(())
}
