// ABOUTME: Entry point for the uls binary.
// ABOUTME: Parses CLI arguments, initializes tracing, opens the data directory, and serves the HTTP API.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use uls_server::{AppState, UlsConfig, create_router};

#[derive(Debug, Parser)]
#[command(name = "uls", version, about = "Universal logging system: centralized log collection API")]
struct Cli {
    /// Data directory for keys, logs and CSV exports (overrides ULS_HOME)
    #[arg(long)]
    home: Option<PathBuf>,

    /// Socket address to listen on (overrides ULS_BIND)
    #[arg(long)]
    bind: Option<SocketAddr>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(
                    "uls=debug,uls_server=debug,uls_store=debug,tower_http=debug",
                )
            }),
        )
        .init();

    let cli = Cli::parse();
    let mut config = UlsConfig::from_env()?;
    if let Some(home) = cli.home {
        config.home = home;
    }
    if let Some(bind) = cli.bind {
        config.bind = bind;
    }

    let state = Arc::new(AppState::open(config.home.clone())?);
    tracing::info!("data directory: {}", config.home.display());

    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    tracing::info!("uls listening on http://{}", config.bind);

    axum::serve(listener, app).await?;

    Ok(())
}
