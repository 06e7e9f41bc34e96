//! Web Search Server
//!
//! Serves `GET /?q=<term>` backed by Google Custom Search.
//!
//! # Configuration
//! Set `KEY` and `CX` env vars or configure in `~/.web-search/config.toml`

use anyhow::Result;
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use web_search::config::Config;
use web_search::{server, GoogleSearchBackend, SearchBackend};

#[derive(Parser)]
#[command(name = "web-search")]
#[command(about = "Plain-text web search over Google Custom Search")]
struct Cli {
    /// Config file (defaults to ~/.web-search/config.toml)
    #[arg(long, env = "WEB_SEARCH_CONFIG_PATH")]
    config: Option<PathBuf>,

    /// Address to listen on (overrides the config file)
    #[arg(long, env = "WEB_SEARCH_BIND")]
    bind: Option<SocketAddr>,
}

#[tokio::main]
async fn main() -> Result<()> {
    search_common::init_tracing("web_search")?;

    let cli = Cli::parse();

    tracing::info!("Starting Web Search Server");

    let mut config = match &cli.config {
        Some(path) => {
            let mut config = Config::load_from(path)?;
            config.apply_env(|name| std::env::var(name).ok());
            config
        }
        None => Config::load()?,
    };
    if let Some(bind) = cli.bind {
        config.server.bind = bind;
    }

    if !config.google.is_complete() {
        tracing::warn!("Google key or engine id is empty; searches will fail with a config error");
    }

    let backend: Arc<dyn SearchBackend> = Arc::new(GoogleSearchBackend::new(
        config.google.key.clone(),
        config.google.engine_id.clone(),
    ));
    tracing::info!("Using {} backend", backend.name());

    server::serve(config.server.bind, backend).await?;

    tracing::info!("Server shutting down");
    Ok(())
}
