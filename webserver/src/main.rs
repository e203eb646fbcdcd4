//! WebServer entry point
//!
//! Loads the dataset once, then serves the dashboard until Ctrl+C.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use engine::{CsvDatasetSource, DashboardEngine, Dataset};
use shared::{ProcessId, RegionTable, logging, process_info};

use webserver::{RealWebSocketManager, WebServer, WebServerError, WebServerState};

#[derive(Parser, Debug)]
#[command(name = "webserver")]
#[command(about = "Interactive crime dashboard server")]
struct Args {
    /// Interface to bind
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port for HTTP and WebSocket connections
    #[arg(long, default_value = "8050")]
    port: u16,

    /// Communities and Crime data file (comma separated, no header, `?` for missing)
    #[arg(long, default_value = "communities_crime.data")]
    data: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    ProcessId::init_webserver();
    logging::init_tracing_with_level(Some(&args.log_level));
    logging::log_startup(ProcessId::current(), "crime dashboard webserver");

    let bind_address: SocketAddr = format!("{}:{}", args.host, args.port)
        .parse()
        .map_err(|e| WebServerError::config(format!("Invalid bind address: {e}")))?;

    let source = CsvDatasetSource::new(args.data.clone());
    let dataset = Dataset::from_source(&source, RegionTable::us_states())
        .await
        .with_context(|| format!("loading dataset from {}", args.data.display()))?;
    process_info!(ProcessId::current(), "📊 Loaded {} communities", dataset.len());

    let engine = DashboardEngine::new(Arc::new(dataset));
    let state = WebServerState::new(bind_address, engine)?;
    let server = WebServer::new(state, RealWebSocketManager::new());

    server.run().await?;

    logging::log_success(ProcessId::current(), "WebServer stopped gracefully");
    Ok(())
}
