// docroute - REST API server
// Run with: cargo run --bin server

//! Starts the document routing API backed by in-memory storage and the
//! logging notifier. Host and port come from the environment
//! (`SERVER_HOST`/`SERVER_PORT`), with `.env` support for development.

use docroute::ApiServerBuilder;
use dotenv::dotenv;
use std::env;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // .env is optional; deployments set real environment variables
    if let Err(e) = dotenv() {
        eprintln!("Warning: could not load .env file: {}", e);
    }

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    info!("🚀 Starting docroute server...");
    info!("================================");

    let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());
    let server_host = env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let server_port = env::var("SERVER_PORT")
        .unwrap_or_else(|_| "4000".to_string())
        .parse::<u16>()
        .unwrap_or(4000);

    info!("Environment: {}", environment);
    info!("Server: {}:{}", server_host, server_port);

    ApiServerBuilder::new()
        .with_host(server_host)
        .with_port(server_port)
        .build()
        .run()
        .await?;

    Ok(())
}
