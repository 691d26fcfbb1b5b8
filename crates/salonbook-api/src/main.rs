//! salonbook REST API entry point.
//!
//! Binary name: `salonbook`
//!
//! Parses CLI arguments, loads configuration, initializes the database and
//! services, then starts the HTTP server.

mod http;
mod state;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use state::AppState;

#[derive(Parser)]
#[command(name = "salonbook", about = "Salon booking platform server", version)]
struct Cli {
    /// Path to a TOML config file.
    #[arg(long, env = "SALONBOOK_CONFIG")]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server.
    Serve {
        /// Override the configured bind address.
        #[arg(long)]
        bind: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "info",
        1 => "info,salonbook=debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .with_target(false)
        .init();

    let config = salonbook_infra::config::AppConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Serve { bind } => {
            let addr = bind.unwrap_or_else(|| config.bind_addr.clone());
            let state = AppState::init(&config).await?;
            let router = http::router::build_router(state, &config.uploads_dir());

            let listener = tokio::net::TcpListener::bind(&addr).await?;
            tracing::info!(%addr, "salonbook listening");
            axum::serve(listener, router).await?;
        }
    }

    Ok(())
}
