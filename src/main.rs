// reelsense - main.rs
// Bootstrap: config, dataset load, HTTP server

use std::sync::Arc;

use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use reelsense::app_state::AppState;
use reelsense::config_loader::load_config;
use reelsense::dataset::load_dataset;
use reelsense::web::build_router;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Movie preference feedback and training backend")]
struct Args {
    /// Bind address, overriding the configured one
    #[clap(long)]
    addr: Option<String>,

    /// Dataset CSV path, overriding the configured one
    #[clap(long)]
    csv: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let mut config = load_config().map_err(|e| anyhow::anyhow!("failed to load config: {e}"))?;
    if let Some(addr) = args.addr {
        config.addr = addr;
    }
    if let Some(csv) = args.csv {
        config.csv_path = csv;
    }

    // A broken dataset is logged, not fatal: the server keeps running and
    // dataset-dependent routes report the condition explicitly.
    let dataset = match load_dataset(&config.csv_path) {
        Ok(records) => {
            info!(rows = records.len(), path = %config.csv_path, "movie dataset loaded");
            Some(records)
        }
        Err(e) => {
            error!(path = %config.csv_path, "error loading CSV: {e}");
            warn!("continuing without a dataset; / and /test will be unavailable");
            None
        }
    };

    let state = Arc::new(AppState::new(config.clone(), dataset));
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&config.addr).await?;
    info!("HTTP server listening on http://{}", config.addr);
    axum::serve(listener, app).await?;

    Ok(())
}
