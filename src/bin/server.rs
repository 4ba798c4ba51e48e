// src/bin/server.rs

use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};
use StreamSift::config::server::Args;
use StreamSift::config::load_pipeline_config;
use StreamSift::error::{PipelineError, Result};
use StreamSift::server::run_server;
use StreamSift::transform::RecordTransformer;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize tracing subscriber
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")); // Default to info if RUST_LOG is not set
    fmt::Subscriber::builder().with_env_filter(filter).init();

    info!("Server starting.");
    info!(
        "Loading pipeline configuration from: {}",
        args.pipeline_config.display()
    );

    let config = load_pipeline_config(&args.pipeline_config)?;

    if args.validate_config {
        info!("Pipeline configuration is valid.");
        return Ok(());
    }

    let transformer = Arc::new(RecordTransformer::from_config(&config)?);
    info!("Pipeline ready with {} stages.", transformer.num_stages());

    let addr: SocketAddr = args.bind_addr.parse().map_err(|e| {
        PipelineError::ConfigError(format!("Invalid bind address '{}': {}", args.bind_addr, e))
    })?;

    run_server(addr, transformer).await
}
