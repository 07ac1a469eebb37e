//! blogly - minimal blog application server
//!
//! Parses command-line flags, loads `.env`, initializes tracing, and
//! starts the HTTP server.

use std::net::{IpAddr, SocketAddr};

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use blogly_server::ServerConfig;

#[derive(Parser, Debug)]
#[command(name = "blogly", about = "Blogly HTTP server")]
struct Cli {
    /// Address to bind the HTTP server to
    #[arg(long, default_value = "127.0.0.1")]
    host: IpAddr,

    /// Port to bind the HTTP server to
    #[arg(long, default_value_t = 3030)]
    port: u16,

    /// PostgreSQL connection string (falls back to DATABASE_URL)
    #[arg(long)]
    database_url: Option<String>,
}

fn init_tracing() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .try_init()
        .map_err(|err| anyhow!(err))
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is fine; env vars may come from the environment
    dotenvy::dotenv().ok();
    init_tracing().ok();

    let cli = Cli::parse();

    let database_url = match cli.database_url {
        Some(url) => url,
        None => std::env::var("DATABASE_URL")
            .context("set DATABASE_URL or pass --database-url")?,
    };

    let config = ServerConfig {
        bind_addr: SocketAddr::new(cli.host, cli.port),
        database_url,
    };

    tracing::info!("Starting Blogly on {}", config.bind_addr);
    blogly_server::run_server(config).await?;
    Ok(())
}
