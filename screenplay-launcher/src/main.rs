mod cli;

use axum::Router;
use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Read from the working directory only.
const ENV_FILE: &str = ".env";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Loaded before the subscriber so RUST_LOG may come from .env
    let dotenv = dotenvy::from_path(ENV_FILE);
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();
    if let Err(e) = dotenv {
        tracing::warn!("No .env file loaded: {}", e);
    }
    let cli = cli::Cli::parse();
    let config = cli.backend_config();
    let router = backend::init(Router::new(), &config).await?;
    let listener = tokio::net::TcpListener::bind((cli.host.as_str(), cli.port)).await?;
    tracing::info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, router).await?;
    Ok(())
}
